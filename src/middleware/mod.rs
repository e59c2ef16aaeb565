pub mod auth;
pub mod error_handler;
pub mod request_id;

pub use error_handler::ErrorLogger;
pub use request_id::{RequestId, RequestIdMiddleware};
