//! Effective tenant resolution for report requests.
//!
//! Reports are scoped to the caller's own business. Only `super_admin` may
//! point a report at another business through the `businessId` parameter;
//! the same parameter from anyone else is ignored rather than rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{AppError, Result};

/// Caller role as issued by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Manager,
}

impl Role {
    /// Roles allowed on report routes
    pub const REPORT_VIEWERS: &'static [Role] = &[Role::SuperAdmin, Role::Admin];

    /// Roles allowed on record listings
    pub const RECORD_VIEWERS: &'static [Role] = &[Role::SuperAdmin, Role::Admin, Role::Editor];

    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "manager" => Ok(Role::Manager),
            other => Err(AppError::unauthorized(format!("unknown role '{}'", other))),
        }
    }
}

/// Authenticated caller, attached by the identity layer before any handler runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    /// Own business; `None` for accounts not bound to a tenant
    pub business_id: Option<i64>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role, business_id: Option<i64>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            business_id,
        }
    }

    /// Fail with `Forbidden` unless the role is one of `allowed`
    pub fn require_role(&self, allowed: &[Role]) -> Result<()> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        warn!(
            user_id = %self.user_id,
            role = %self.role,
            "Access denied: insufficient permissions"
        );
        Err(AppError::forbidden("insufficient permissions"))
    }

    /// Gate for cross-tenant operations
    pub fn require_privileged(&self) -> Result<()> {
        if self.role.is_privileged() {
            Ok(())
        } else {
            Err(AppError::forbidden("super admin only"))
        }
    }

    /// Caller's own business, for routes that never accept an override
    pub fn own_business(&self) -> Result<i64> {
        self.business_id
            .ok_or_else(|| AppError::forbidden("no business associated with this account"))
    }
}

/// Effective tenant for a scoped report.
///
/// `requested` is honored only for the privileged role; for anyone else it
/// is dropped and the caller's own business is used.
pub fn resolve_report_tenant(principal: &Principal, requested: Option<i64>) -> Result<i64> {
    match requested {
        Some(business_id) if principal.role.is_privileged() => Ok(business_id),
        Some(business_id) => {
            if principal.business_id != Some(business_id) {
                warn!(
                    user_id = %principal.user_id,
                    role = %principal.role,
                    requested_business_id = business_id,
                    "Ignoring business override from non-privileged caller"
                );
            }
            principal.own_business()
        }
        None => principal.own_business(),
    }
}
