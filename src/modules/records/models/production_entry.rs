use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Cursor, Positioned};
use crate::modules::records::models::{LedgerRecord, RecordKind};

/// Units of a product produced on a date at `unit_cost` each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

impl ProductionEntry {
    /// `quantity × unit_cost`
    pub fn total_cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_cost
    }
}

impl Positioned for ProductionEntry {
    fn position(&self) -> Cursor {
        Cursor::new(self.date, self.id)
    }
}

impl LedgerRecord for ProductionEntry {
    const KIND: RecordKind = RecordKind::Production;

    fn id(&self) -> i64 {
        self.id
    }
}
