pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Expense, LedgerRecord, ProductionEntry, RecordKind, Sale};
pub use repositories::{PgRecordRepository, RecordRepository};
pub use services::RecordService;
