use rust_decimal::Decimal;
use serde::Serialize;

/// Cross-tenant totals over a period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub total_profit: Decimal,
    /// Distinct tenants with at least one sale in the period
    pub active_businesses: i64,
}

/// Per-tenant totals as read from the store
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BusinessTotals {
    pub id: i64,
    pub name: String,
    pub sales: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRanking {
    pub id: i64,
    pub name: String,
    pub sales: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

impl From<BusinessTotals> for BusinessRanking {
    fn from(totals: BusinessTotals) -> Self {
        Self {
            profit: totals.sales - totals.expenses,
            id: totals.id,
            name: totals.name,
            sales: totals.sales,
            expenses: totals.expenses,
        }
    }
}
