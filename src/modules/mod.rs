pub mod businesses;
pub mod health;
pub mod products;
pub mod records;
pub mod reports;

use actix_web::web;

use crate::middleware::error_handler::configure_extractors;

/// Register every route of the service.
///
/// Handlers expect their services as `web::Data`: one `RecordService` per
/// record kind, `ProductService`, `BusinessService` and `ReportAssembler`.
/// Malformed query strings and path segments answer with `VALIDATION_ERROR`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_extractors)
        .configure(health::configure)
        .configure(records::controllers::configure)
        .configure(products::controllers::configure)
        .configure(businesses::controllers::configure)
        .configure(reports::controllers::configure);
}
