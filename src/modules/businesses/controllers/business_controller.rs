use actix_web::{web, HttpResponse};

use crate::core::{AppError, Principal};
use crate::modules::businesses::services::BusinessService;

/// GET /businesses/active
pub async fn list_active_businesses(
    service: web::Data<BusinessService>,
    _principal: Principal,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.active().await?))
}

/// GET /businesses
pub async fn list_businesses(
    service: web::Data<BusinessService>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.all(&principal).await?))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/businesses")
            .route("", web::get().to(list_businesses))
            .route("/active", web::get().to(list_active_businesses)),
    );
}
