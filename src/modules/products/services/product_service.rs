use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::products::models::Product;
use crate::modules::products::repositories::ProductRepository;

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, business_id: i64) -> Result<Vec<Product>> {
        self.repo.list(business_id).await
    }

    /// Delete a product of `business_id`.
    ///
    /// A product owned by another business is reported exactly like a
    /// missing one.
    pub async fn delete(&self, business_id: i64, id: i64) -> Result<()> {
        if !self.repo.delete(business_id, id).await? {
            return Err(AppError::not_found(format!("product {}", id)));
        }

        info!(business_id, product_id = id, "Product deleted");
        Ok(())
    }
}
