// Listing API contract
//
// Record listings, scoped lookups, product deletion and tenant listings
// over the in-memory ledger.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{test, App};
use serde_json::Value;

use opsledger::middleware::{ErrorLogger, RequestIdMiddleware};

use helpers::*;

macro_rules! app {
    ($ledger:expr) => {
        test::init_service(
            App::new()
                .wrap(ErrorLogger)
                .wrap(RequestIdMiddleware)
                .configure(configure_app(Arc::new($ledger))),
        )
        .await
    };
}

fn header(resp: &actix_web::dev::ServiceResponse, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn ids(rows: &Value) -> Vec<i64> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_unbounded_listing_is_bare_array() {
    let app = app!(two_tenant_ledger());
    let req = get_as("/sales", "editor", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "X-Total-Count").is_none());
    assert!(header(&resp, "X-Next-Cursor").is_none());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&body), vec![3, 2, 1]);
    assert_eq!(body[0]["productName"], "Bread");
    assert_eq!(body[0]["date"], "2024-03-03");
}

#[actix_web::test]
async fn test_offset_page_reports_total() {
    let app = app!(two_tenant_ledger());
    let req = get_as("/sales?limit=2", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "X-Total-Count").as_deref(), Some("3"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);
    assert_eq!(ids(&body["rows"]), vec![3, 2]);

    let req = get_as("/sales?limit=2&offset=2", "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["rows"]), vec![1]);
}

#[actix_web::test]
async fn test_keyset_page_carries_next_cursor() {
    let app = app!(two_tenant_ledger());

    let req = get_as("/sales?limit=1&cursor=2024-03-03%7C3", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let next = header(&resp, "X-Next-Cursor").expect("full page has a next cursor");
    assert_eq!(next, "2024-03-01|2");
    assert!(header(&resp, "X-Total-Count").is_none());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&body["rows"]), vec![2]);
    assert_eq!(body["nextCursor"]["date"], "2024-03-01");
    assert_eq!(body["nextCursor"]["id"], 2);

    let uri = format!("/sales?limit=1&cursor={}", next.replace('|', "%7C"));
    let req = get_as(&uri, "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["rows"]), vec![1]);
}

#[actix_web::test]
async fn test_keyset_with_split_cursor_fields() {
    let app = app!(two_tenant_ledger());
    let req = get_as(
        "/sales?limit=5&cursorDate=2024-03-03&cursorId=3",
        "admin",
        Some(BAKERY),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "X-Next-Cursor").is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&body["rows"]), vec![2, 1]);
    assert!(body["nextCursor"].is_null());
}

#[actix_web::test]
async fn test_malformed_cursor_is_rejected() {
    let app = app!(two_tenant_ledger());

    for uri in [
        "/sales?limit=2&cursor=garbage",
        "/sales?limit=2&cursor=2024-02-30%7C1",
        "/sales?limit=2&cursorDate=2024-03-01",
    ] {
        let req = get_as(uri, "admin", Some(BAKERY)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "INVALID_CURSOR", "{}", uri);
    }
}

#[actix_web::test]
async fn test_limit_out_of_bounds() {
    let app = app!(two_tenant_ledger());
    let req = get_as("/sales?limit=0", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_malformed_parameters_keep_error_shape() {
    let app = app!(two_tenant_ledger());

    for (uri, kind) in [
        ("/sales?date=2024-13-01", "INVALID_PERIOD"),
        ("/production?date=yesterday", "INVALID_PERIOD"),
        ("/sales?limit=abc", "VALIDATION_ERROR"),
        ("/sales?limit=2&offset=-x", "VALIDATION_ERROR"),
        ("/expenses/abc", "VALIDATION_ERROR"),
    ] {
        let req = get_as(uri, "admin", Some(BAKERY)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], kind, "{}", uri);
        assert_eq!(body["error"]["code"], 400, "{}", uri);
    }
}

#[actix_web::test]
async fn test_date_filter() {
    let app = app!(two_tenant_ledger());
    let req = get_as("/production?date=2024-03-02", "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![3, 2]);
}

#[actix_web::test]
async fn test_foreign_record_is_not_found() {
    let app = app!(two_tenant_ledger());

    // expense 3 belongs to the cafe
    let req = get_as("/expenses/3", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "NOT_FOUND");

    let req = get_as("/expenses/3", "admin", Some(CAFE)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = delete_as("/expenses/3", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_record() {
    let app = app!(two_tenant_ledger());

    let req = delete_as("/sales/1", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = get_as("/sales", "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![3, 2]);
}

#[actix_web::test]
async fn test_listing_roles() {
    let app = app!(two_tenant_ledger());
    let req = get_as("/sales", "manager", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // listings need an own business, even for super admins
    let req = get_as("/sales", "super_admin", None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_missing_identity_is_unauthorized() {
    let app = app!(two_tenant_ledger());
    let req = test::TestRequest::get().uri("/sales").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_product_in_use_cannot_be_deleted() {
    let app = app!(two_tenant_ledger());

    let req = delete_as("/products/10", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "PRODUCT_IN_USE");

    let req = delete_as("/products/12", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = get_as("/products", "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"Baguette"));
}

#[actix_web::test]
async fn test_foreign_product_is_not_found() {
    let app = app!(two_tenant_ledger());
    let req = delete_as("/products/20", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_business_listings() {
    let app = app!(two_tenant_ledger().inactive_business(3, "Closed Deli"));

    let req = get_as("/businesses/active", "admin", Some(BAKERY)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = get_as("/businesses", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let req = get_as("/businesses", "super_admin", None).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["status"], "inactive");
}

#[actix_web::test]
async fn test_store_failure_is_bad_gateway() {
    let app = app!(MemoryLedger::new().unavailable());
    let req = get_as("/sales?limit=10", "admin", Some(BAKERY)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
}
