pub mod report_repository;

pub use report_repository::{PgReportRepository, ReportRepository, TenantScope};
