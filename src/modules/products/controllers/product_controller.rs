use actix_web::{web, HttpResponse};

use crate::core::{AppError, Principal, Role};
use crate::modules::products::services::ProductService;

/// GET /products
pub async fn list_products(
    service: web::Data<ProductService>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    principal.require_role(Role::RECORD_VIEWERS)?;
    let products = service.list(principal.own_business()?).await?;

    Ok(HttpResponse::Ok().json(products))
}

/// DELETE /products/{id}
///
/// 409 `PRODUCT_IN_USE` while sales or production still reference the product.
pub async fn delete_product(
    service: web::Data<ProductService>,
    principal: Principal,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal.require_role(Role::RECORD_VIEWERS)?;
    let id = path.into_inner();
    service.delete(principal.own_business()?, id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": id, "deleted": true })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
