use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::Result;
use crate::modules::businesses::models::Business;

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Business>>;

    async fn list_all(&self) -> Result<Vec<Business>>;
}

pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    async fn list_active(&self) -> Result<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(
            "SELECT id, name, status FROM businesses WHERE status = 'active' ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(businesses)
    }

    async fn list_all(&self) -> Result<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(
            "SELECT id, name, status FROM businesses ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(businesses)
    }
}
