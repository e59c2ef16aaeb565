use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Cursor, Positioned};
use crate::modules::records::models::{LedgerRecord, RecordKind};

/// One sales line: `quantity` units of a product sold at `unit_price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub date: NaiveDate,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl Sale {
    /// `quantity × unit_price`
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

impl Positioned for Sale {
    fn position(&self) -> Cursor {
        Cursor::new(self.date, self.id)
    }
}

impl LedgerRecord for Sale {
    const KIND: RecordKind = RecordKind::Sale;

    fn id(&self) -> i64 {
        self.id
    }
}
