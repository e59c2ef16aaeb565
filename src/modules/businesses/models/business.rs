use serde::{Deserialize, Serialize};

use crate::core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Active,
    Inactive,
}

impl TryFrom<String> for BusinessStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(BusinessStatus::Active),
            "inactive" => Ok(BusinessStatus::Inactive),
            other => Err(AppError::internal(format!("unknown business status '{}'", other))),
        }
    }
}

/// A tenant of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: BusinessStatus,
}

impl Business {
    pub fn is_active(&self) -> bool {
        self.status == BusinessStatus::Active
    }
}
