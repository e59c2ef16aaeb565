pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use repositories::{PgReportRepository, ReportRepository, TenantScope};
pub use services::{AggregationEngine, ReportAssembler};
