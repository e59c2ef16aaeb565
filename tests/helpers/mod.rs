// Test helpers shared by integration and contract tests.
//
// `MemoryLedger` implements every store trait over in-memory tables, so the
// services, the engine and the HTTP routes run unchanged against it.
// `TestDatabase` runs the PostgreSQL repositories against a real server.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]


pub use memory_store::*;
pub use test_app::*;
pub use test_data::*;
pub use test_database::*;
