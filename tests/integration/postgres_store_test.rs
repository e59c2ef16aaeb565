// PostgreSQL store
//
// Runs the SQL repositories against a real server: keyset tie-breaks on
// shared dates, offset totals, pre-aggregated profitability, zero-filled
// sums and the ranking order.
//
// Requires TEST_DATABASE_URL; run with `cargo test -- --ignored`.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use opsledger::businesses::{BusinessRepository, PgBusinessRepository};
use opsledger::core::{AppError, ListFilter, PaginationRequest, Positioned, ReportPeriod};
use opsledger::products::{PgProductRepository, ProductRepository};
use opsledger::records::{Expense, PgRecordRepository, RecordService, Sale};
use opsledger::reports::models::TrendDensity;
use opsledger::reports::{AggregationEngine, PgReportRepository, TenantScope};

use helpers::*;

const DELI: i64 = 3;
const CLOSED: i64 = 4;

fn first_week() -> ReportPeriod {
    ReportPeriod::new(march(1), march(7)).unwrap()
}

fn sales(db: &TestDatabase) -> RecordService<Sale> {
    RecordService::new(Arc::new(PgRecordRepository::new(db.pool.clone())), 500)
}

fn engine(db: &TestDatabase) -> AggregationEngine {
    AggregationEngine::new(
        Arc::new(PgReportRepository::new(db.pool.clone())),
        RANKING_DEFAULT_LIMIT,
    )
}

/// 25 bakery sales over four dates with ids deliberately out of date
/// order, plus a few cafe sales on the same dates
async fn crowded(db: &TestDatabase) {
    db.business(BAKERY, "Bakery", "active").await;
    db.business(CAFE, "Cafe", "active").await;
    db.product(BAKERY, 10, "Bread").await;
    db.product(CAFE, 20, "Espresso").await;

    for id in 1..=25i64 {
        let day = 1 + ((id * 7) % 4) as u32;
        db.sale(BAKERY, id, march(day), 10, 1, dec!(1)).await;
    }
    for id in 100..103i64 {
        db.sale(CAFE, id, march(2), 20, 1, dec!(3)).await;
    }
}

/// Offset first page, then keyset pages from the last row seen
async fn walk(service: &RecordService<Sale>, filter: ListFilter, limit: i64) -> Vec<Sale> {
    let mut seen = Vec::new();
    let mut request = PaginationRequest::Offset { limit, offset: 0 };

    loop {
        let listing = service.list_with(BAKERY, filter, request).await.unwrap();
        let rows = listing.rows().to_vec();
        let exhausted = (rows.len() as i64) < limit;
        let last = rows.last().map(Positioned::position);
        seen.extend(rows);

        match last {
            Some(after) if !exhausted => request = PaginationRequest::Keyset { limit, after },
            _ => return seen,
        }
    }
}

/// Bakery week with two production rows for bread, one for croissant,
/// an unsold baguette and activity outside the week
async fn bakery_week(db: &TestDatabase) {
    db.business(BAKERY, "Bakery", "active").await;
    db.business(CAFE, "Cafe", "active").await;
    db.product(BAKERY, 10, "Bread").await;
    db.product(BAKERY, 11, "Croissant").await;
    db.product(BAKERY, 12, "Baguette").await;
    db.product(CAFE, 20, "Espresso").await;

    db.sale(BAKERY, 1, march(1), 10, 2, dec!(5)).await;
    db.sale(BAKERY, 2, march(1), 11, 5, dec!(2)).await;
    db.sale(BAKERY, 3, march(3), 10, 4, dec!(5)).await;
    db.sale(BAKERY, 4, march(10), 10, 100, dec!(5)).await;
    db.sale(CAFE, 5, march(2), 20, 100, dec!(3)).await;

    db.production(BAKERY, 1, march(1), 10, 10, dec!(1)).await;
    db.production(BAKERY, 2, march(2), 10, 5, dec!(1)).await;
    db.production(BAKERY, 3, march(4), 10, 2, dec!(1)).await;
    db.production(BAKERY, 4, march(2), 11, 1, dec!(3)).await;

    db.expense(BAKERY, 1, march(4), dec!(12)).await;
    db.expense(CAFE, 2, march(2), dec!(50)).await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_keyset_walk_splits_shared_dates_on_id() {
    let db = TestDatabase::new().await;
    crowded(&db).await;
    let service = sales(&db);

    let all = service
        .list_with(BAKERY, ListFilter::default(), PaginationRequest::Unbounded)
        .await
        .unwrap();
    let expected: Vec<i64> = all.rows().iter().map(|s| s.id).collect();
    assert_eq!(expected.len(), 25);
    assert!(all
        .rows()
        .windows(2)
        .all(|w| w[0].position() > w[1].position()));

    for limit in [1, 4, 5, 7, 25, 30] {
        let walked: Vec<i64> = walk(&service, ListFilter::default(), limit)
            .await
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(walked, expected, "limit {}", limit);
    }

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_keyset_page_reports_next_cursor() {
    let db = TestDatabase::new().await;
    crowded(&db).await;
    let service = sales(&db);

    let all = service
        .list_with(BAKERY, ListFilter::default(), PaginationRequest::Unbounded)
        .await
        .unwrap();
    let after = all.rows()[2].position();

    let page = service
        .list_with(
            BAKERY,
            ListFilter::default(),
            PaginationRequest::Keyset { limit: 3, after },
        )
        .await
        .unwrap();
    let ids: Vec<i64> = page.rows().iter().map(|s| s.id).collect();
    let expected: Vec<i64> = all.rows()[3..6].iter().map(|s| s.id).collect();
    assert_eq!(ids, expected);
    assert_eq!(page.next_cursor(), Some(all.rows()[5].position()));

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_offset_total_and_date_filter() {
    let db = TestDatabase::new().await;
    crowded(&db).await;
    let service = sales(&db);

    let listing = service
        .list_with(
            BAKERY,
            ListFilter::default(),
            PaginationRequest::Offset { limit: 10, offset: 20 },
        )
        .await
        .unwrap();
    assert_eq!(listing.total(), Some(25));
    assert_eq!(listing.rows().len(), 5);

    let filter = ListFilter {
        date: Some(march(2)),
    };
    let on_day = service
        .list_with(BAKERY, filter, PaginationRequest::Unbounded)
        .await
        .unwrap();
    assert!(!on_day.rows().is_empty());
    assert!(on_day.rows().iter().all(|s| s.date == march(2)));

    let counted = service
        .list_with(BAKERY, filter, PaginationRequest::Offset { limit: 2, offset: 0 })
        .await
        .unwrap();
    assert_eq!(counted.total(), Some(on_day.rows().len() as i64));

    let walked = walk(&service, filter, 2).await;
    assert_eq!(walked.len(), on_day.rows().len());

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_record_lookup_and_delete_are_scoped() {
    let db = TestDatabase::new().await;
    bakery_week(&db).await;
    let expenses: RecordService<Expense> =
        RecordService::new(Arc::new(PgRecordRepository::new(db.pool.clone())), 500);

    assert_eq!(expenses.get(BAKERY, 1).await.unwrap().amount, dec!(12));
    assert_eq!(expenses.get(CAFE, 1).await.unwrap_err().kind(), "NOT_FOUND");
    assert_eq!(expenses.delete(CAFE, 1).await.unwrap_err().kind(), "NOT_FOUND");

    expenses.delete(BAKERY, 1).await.unwrap();
    assert_eq!(expenses.get(BAKERY, 1).await.unwrap_err().kind(), "NOT_FOUND");

    let sale = sales(&db).get(BAKERY, 2).await.unwrap();
    assert_eq!(sale.product_name, "Croissant");

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_referenced_product_is_in_use() {
    let db = TestDatabase::new().await;
    bakery_week(&db).await;
    let products = PgProductRepository::new(db.pool.clone());

    let err = products.delete(BAKERY, 10).await.unwrap_err();
    assert!(matches!(err, AppError::ProductInUse(_)));

    assert!(!products.delete(CAFE, 12).await.unwrap());
    assert!(products.delete(BAKERY, 12).await.unwrap());

    let names: Vec<String> = products
        .list(BAKERY)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Bread", "Croissant"]);

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_profitability_is_not_fanned_out() {
    let db = TestDatabase::new().await;
    bakery_week(&db).await;

    let rows = engine(&db)
        .product_profitability(BAKERY, first_week())
        .await
        .unwrap();

    let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![10, 11, 12]);

    // Bread: two sales against three production rows
    assert_eq!(rows[0].quantity_sold, 6);
    assert_eq!(rows[0].total_sales, dec!(30));
    assert_eq!(rows[0].production_cost, dec!(17));
    assert_eq!(rows[0].profit, dec!(13));

    assert_eq!(rows[1].total_sales, dec!(10));
    assert_eq!(rows[1].production_cost, dec!(3));
    assert_eq!(rows[1].profit, dec!(7));

    assert_eq!(rows[2].quantity_sold, 0);
    assert_eq!(rows[2].total_sales, Decimal::ZERO);
    assert_eq!(rows[2].profit, Decimal::ZERO);

    let best = engine(&db)
        .most_profitable(BAKERY, first_week())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.name, "Bread");

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_empty_sums_read_as_zero() {
    let db = TestDatabase::new().await;
    bakery_week(&db).await;
    let engine = engine(&db);
    let empty = ReportPeriod::month_of(2023, 1).unwrap();

    let summary = engine
        .period_summary(TenantScope::Business(BAKERY), empty)
        .await
        .unwrap();
    assert_eq!(summary.total_sales, Decimal::ZERO);
    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert_eq!(summary.daily_average_profit, Decimal::ZERO);

    let global = engine.global_summary(empty).await.unwrap();
    assert_eq!(global.total_sales, Decimal::ZERO);
    assert_eq!(global.active_businesses, 0);

    let week = engine
        .period_summary(TenantScope::Business(BAKERY), first_week())
        .await
        .unwrap();
    assert_eq!(week.total_sales, dec!(40));
    assert_eq!(week.total_expenses, dec!(12));
    assert_eq!(week.profit, dec!(28));

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_trend_top_products_and_lines() {
    let db = TestDatabase::new().await;
    bakery_week(&db).await;
    let engine = engine(&db);

    let trend = engine
        .daily_trend(BAKERY, first_week(), TrendDensity::Sparse)
        .await
        .unwrap();
    let dates: Vec<_> = trend.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![march(1), march(3), march(4)]);
    assert_eq!(trend[0].sales, dec!(20));
    assert_eq!(trend[2].profit, dec!(-12));

    let dense = engine
        .daily_trend(BAKERY, first_week(), TrendDensity::Dense)
        .await
        .unwrap();
    assert_eq!(dense.len(), 7);

    let top = engine
        .top_products(BAKERY, first_week(), Some(1))
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Bread");
    assert_eq!(top[0].total_quantity, 6);
    assert_eq!(top[0].total_revenue, dec!(30));

    let every = engine.top_products(BAKERY, first_week(), None).await.unwrap();
    assert_eq!(every.len(), 2);

    let lines = engine.ledger_lines(BAKERY, first_week()).await.unwrap();
    let sale_ids: Vec<i64> = lines.sales.iter().map(|l| l.id).collect();
    assert_eq!(sale_ids, vec![1, 2, 3]);
    assert_eq!(lines.sales[0].total, dec!(10));
    assert_eq!(lines.production.len(), 4);
    assert_eq!(lines.production[0].total_cost, dec!(10));
    assert_eq!(lines.expenses.len(), 1);

    db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL connection
async fn test_ranking_orders_by_sales_then_id() {
    let db = TestDatabase::new().await;
    db.business(BAKERY, "Bakery", "active").await;
    db.business(CAFE, "Cafe", "active").await;
    db.business(DELI, "Deli", "active").await;
    db.business(CLOSED, "Closed", "inactive").await;
    db.product(BAKERY, 10, "Bread").await;
    db.product(CAFE, 20, "Espresso").await;
    db.product(DELI, 30, "Sandwich").await;

    db.sale(BAKERY, 1, march(2), 10, 10, dec!(10)).await;
    db.sale(CAFE, 2, march(3), 20, 4, dec!(25)).await;
    db.sale(DELI, 3, march(1), 30, 2, dec!(100)).await;
    db.sale(DELI, 4, march(5), 30, 1, dec!(100)).await;
    db.expense(BAKERY, 1, march(2), dec!(30)).await;
    db.expense(DELI, 2, march(4), dec!(50)).await;

    let engine = engine(&db);

    let ranking = engine.business_ranking(first_week(), None).await.unwrap();
    let ids: Vec<i64> = ranking.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![DELI, BAKERY, CAFE, CLOSED]);
    assert_eq!(ranking[0].sales, dec!(300));
    assert_eq!(ranking[0].profit, dec!(250));
    assert_eq!(ranking[1].profit, dec!(70));
    assert_eq!(ranking[3].sales, Decimal::ZERO);

    let capped = engine.business_ranking(first_week(), Some(2)).await.unwrap();
    let ids: Vec<i64> = capped.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![DELI, BAKERY]);

    let global = engine.global_summary(first_week()).await.unwrap();
    assert_eq!(global.total_sales, dec!(500));
    assert_eq!(global.total_expenses, dec!(80));
    assert_eq!(global.total_profit, dec!(420));
    assert_eq!(global.active_businesses, 3);

    let businesses = PgBusinessRepository::new(db.pool.clone());
    let active: HashSet<i64> = businesses
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(active, HashSet::from([BAKERY, CAFE, DELI]));
    assert_eq!(businesses.list_all().await.unwrap().len(), 4);

    db.cleanup().await;
}
