use std::sync::Arc;

use crate::core::{Principal, Result};
use crate::modules::businesses::models::Business;
use crate::modules::businesses::repositories::BusinessRepository;

pub struct BusinessService {
    repo: Arc<dyn BusinessRepository>,
}

impl BusinessService {
    pub fn new(repo: Arc<dyn BusinessRepository>) -> Self {
        Self { repo }
    }

    /// Tenants open for selection
    pub async fn active(&self) -> Result<Vec<Business>> {
        self.repo.list_active().await
    }

    /// Every tenant, including inactive ones; privileged callers only
    pub async fn all(&self, principal: &Principal) -> Result<Vec<Business>> {
        principal.require_privileged()?;
        self.repo.list_all().await
    }
}
