use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::{AppError, Result};
use crate::modules::products::models::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Catalog of `business_id`, ordered by name
    async fn list(&self, business_id: i64) -> Result<Vec<Product>>;

    /// Returns false when no product matched under this business.
    /// Fails with `ProductInUse` while sales or production still reference it.
    async fn delete(&self, business_id: i64, id: i64) -> Result<bool>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, business_id: i64) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, type
            FROM products
            WHERE business_id = $1
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn delete(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND business_id = $2")
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await
            .map_err(|e| in_use_or_store(e, id))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Foreign-key violations mean the product is still referenced
fn in_use_or_store(err: sqlx::Error, id: i64) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::ProductInUse(
            format!("product {} has sales or production records", id),
        ),
        _ => AppError::UpstreamStore(err),
    }
}
