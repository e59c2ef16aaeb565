pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Business, BusinessStatus};
pub use repositories::{BusinessRepository, PgBusinessRepository};
pub use services::BusinessService;
