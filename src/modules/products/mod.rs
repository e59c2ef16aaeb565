pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Product;
pub use repositories::{PgProductRepository, ProductRepository};
pub use services::ProductService;
