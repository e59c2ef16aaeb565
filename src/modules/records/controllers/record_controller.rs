use actix_web::{web, HttpResponse};

use crate::core::{AppError, ListQuery, Listing, Principal, Role};
use crate::modules::records::models::{Expense, LedgerRecord, ProductionEntry, Sale};
use crate::modules::records::services::RecordService;

pub const NEXT_CURSOR_HEADER: &str = "X-Next-Cursor";
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// GET /{kind}
///
/// `limit` + cursor → keyset page, `limit` alone → offset page with total,
/// neither → every row. Listings are always scoped to the caller's business.
pub async fn list_records<R: LedgerRecord>(
    service: web::Data<RecordService<R>>,
    principal: Principal,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    principal.require_role(Role::RECORD_VIEWERS)?;
    let business_id = principal.own_business()?;

    let listing = service.list(business_id, &query).await?;

    let mut response = HttpResponse::Ok();
    if let Some(total) = listing.total() {
        response.insert_header((TOTAL_COUNT_HEADER, total.to_string()));
    }
    if let Some(cursor) = listing.next_cursor() {
        response.insert_header((NEXT_CURSOR_HEADER, cursor.encode()));
    }

    Ok(match listing {
        Listing::All(rows) => response.json(rows),
        listing => response.json(listing),
    })
}

/// GET /{kind}/{id}
pub async fn get_record<R: LedgerRecord>(
    service: web::Data<RecordService<R>>,
    principal: Principal,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal.require_role(Role::RECORD_VIEWERS)?;
    let record = service
        .get(principal.own_business()?, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /{kind}/{id}
pub async fn delete_record<R: LedgerRecord>(
    service: web::Data<RecordService<R>>,
    principal: Principal,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal.require_role(Role::RECORD_VIEWERS)?;
    let id = path.into_inner();
    service.delete(principal.own_business()?, id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": id, "deleted": true })))
}

fn record_scope<R: LedgerRecord>() -> actix_web::Scope {
    web::scope(&format!("/{}", R::KIND.path()))
        .route("", web::get().to(list_records::<R>))
        .route("/{id}", web::get().to(get_record::<R>))
        .route("/{id}", web::delete().to(delete_record::<R>))
}

/// Configure record listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(record_scope::<Sale>())
        .service(record_scope::<Expense>())
        .service(record_scope::<ProductionEntry>());
}
