use rust_decimal::Decimal;
use serde::Serialize;

/// Sales and production of one catalog product over a period.
///
/// Both sides are aggregated independently before being joined to the
/// product, so rows are never multiplied by each other.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductActivity {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
    pub total_sales: Decimal,
    pub production_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityRow {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
    pub total_sales: Decimal,
    pub production_cost: Decimal,
    pub profit: Decimal,
}

impl From<ProductActivity> for ProfitabilityRow {
    fn from(activity: ProductActivity) -> Self {
        Self {
            profit: activity.total_sales - activity.production_cost,
            product_id: activity.product_id,
            name: activity.name,
            quantity_sold: activity.quantity_sold,
            total_sales: activity.total_sales,
            production_cost: activity.production_cost,
        }
    }
}
