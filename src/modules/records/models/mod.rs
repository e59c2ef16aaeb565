pub mod expense;
pub mod production_entry;
pub mod sale;

use std::fmt;

use serde::Serialize;

use crate::core::Positioned;

pub use expense::Expense;
pub use production_entry::ProductionEntry;
pub use sale::Sale;

/// The three transactional record kinds of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Sale,
    Expense,
    Production,
}

impl RecordKind {
    /// Route segment and log label
    pub fn path(&self) -> &'static str {
        match self {
            RecordKind::Sale => "sales",
            RecordKind::Expense => "expenses",
            RecordKind::Production => "production",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A tenant-owned row listed with `(date DESC, id DESC)` ordering
pub trait LedgerRecord: Positioned + Serialize + Clone + Send + Sync + Unpin + 'static {
    const KIND: RecordKind;

    fn id(&self) -> i64;
}
