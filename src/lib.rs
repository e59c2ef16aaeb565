//! OpsLedger reporting service library
//!
//! Tenant-scoped listings with keyset and offset pagination, and the period
//! aggregates behind the ledger's reports.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::businesses;
pub use modules::products;
pub use modules::records;
pub use modules::reports;
