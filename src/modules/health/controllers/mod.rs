mod health_controller;

pub use health_controller::{configure, configure_readiness, HealthResponse, ReadinessResponse};
