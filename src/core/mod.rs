pub mod cursor;
pub mod error;
pub mod pagination;
pub mod period;
pub mod tenant_context;

pub use cursor::Cursor;
pub use error::{AppError, Result};
pub use pagination::{ListFilter, ListQuery, Listing, PaginationRequest, Positioned};
pub use period::ReportPeriod;
pub use tenant_context::{Principal, Role};
