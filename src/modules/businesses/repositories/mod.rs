pub mod business_repository;

pub use business_repository::{BusinessRepository, PgBusinessRepository};
