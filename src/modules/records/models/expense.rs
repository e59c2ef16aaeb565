use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Cursor, Positioned};
use crate::modules::records::models::{LedgerRecord, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl Positioned for Expense {
    fn position(&self) -> Cursor {
        Cursor::new(self.date, self.id)
    }
}

impl LedgerRecord for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn id(&self) -> i64 {
        self.id
    }
}
