// Record listing queries shared by sales, expenses and production.
//
// Every mode orders by (date DESC, id DESC). Keyset pages use a row-value
// comparison so rows sharing a date are split on id, never skipped.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::core::{Cursor, ListFilter, Result};
use crate::modules::records::models::{Expense, LedgerRecord, ProductionEntry, Sale};

/// Store access for one record kind, always scoped by business
#[async_trait]
pub trait RecordRepository<R: LedgerRecord>: Send + Sync {
    /// Up to `limit` rows strictly below `after`
    async fn fetch_after(
        &self,
        business_id: i64,
        filter: ListFilter,
        after: Cursor,
        limit: i64,
    ) -> Result<Vec<R>>;

    /// Rows `offset..offset + limit`
    async fn fetch_window(
        &self,
        business_id: i64,
        filter: ListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<R>>;

    async fn count(&self, business_id: i64, filter: ListFilter) -> Result<i64>;

    async fn fetch_all(&self, business_id: i64, filter: ListFilter) -> Result<Vec<R>>;

    async fn find_by_id(&self, business_id: i64, id: i64) -> Result<Option<R>>;

    /// Returns false when no row matched under this business
    async fn delete(&self, business_id: i64, id: i64) -> Result<bool>;
}

/// SQL shape of a record kind
pub trait PgRecord: LedgerRecord + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;
    /// Select list, table aliased as `r`
    const COLUMNS: &'static str;
    const JOINS: &'static str;
}

impl PgRecord for Sale {
    const TABLE: &'static str = "daily_sales";
    const COLUMNS: &'static str =
        "r.id, r.date, r.product_id, p.name AS product_name, r.quantity, r.unit_price";
    const JOINS: &'static str = "JOIN products p ON p.id = r.product_id";
}

impl PgRecord for Expense {
    const TABLE: &'static str = "expenses";
    const COLUMNS: &'static str = "r.id, r.date, r.description, r.amount";
    const JOINS: &'static str = "";
}

impl PgRecord for ProductionEntry {
    const TABLE: &'static str = "daily_production";
    const COLUMNS: &'static str =
        "r.id, r.date, r.product_id, p.name AS product_name, r.quantity, r.unit_cost";
    const JOINS: &'static str = "JOIN products p ON p.id = r.product_id";
}

fn scoped_select<R: PgRecord>() -> String {
    format!(
        "SELECT {} FROM {} r {} WHERE r.business_id = $1 AND ($2::DATE IS NULL OR r.date = $2)",
        R::COLUMNS,
        R::TABLE,
        R::JOINS
    )
}

/// PostgreSQL implementation for every [`PgRecord`] kind
#[derive(Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<R: PgRecord> RecordRepository<R> for PgRecordRepository {
    async fn fetch_after(
        &self,
        business_id: i64,
        filter: ListFilter,
        after: Cursor,
        limit: i64,
    ) -> Result<Vec<R>> {
        let sql = format!(
            "{} AND (r.date, r.id) < ($3::DATE, $4::BIGINT) ORDER BY r.date DESC, r.id DESC LIMIT $5",
            scoped_select::<R>()
        );

        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(business_id)
            .bind(filter.date)
            .bind(after.date)
            .bind(after.id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn fetch_window(
        &self,
        business_id: i64,
        filter: ListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<R>> {
        let sql = format!(
            "{} ORDER BY r.date DESC, r.id DESC LIMIT $3 OFFSET $4",
            scoped_select::<R>()
        );

        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(business_id)
            .bind(filter.date)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, business_id: i64, filter: ListFilter) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} r WHERE r.business_id = $1 AND ($2::DATE IS NULL OR r.date = $2)",
            R::TABLE
        );

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(business_id)
            .bind(filter.date)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn fetch_all(&self, business_id: i64, filter: ListFilter) -> Result<Vec<R>> {
        let sql = format!("{} ORDER BY r.date DESC, r.id DESC", scoped_select::<R>());

        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(business_id)
            .bind(filter.date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, business_id: i64, id: i64) -> Result<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} r {} WHERE r.business_id = $1 AND r.id = $2",
            R::COLUMNS,
            R::TABLE,
            R::JOINS
        );

        let row = sqlx::query_as::<_, R>(&sql)
            .bind(business_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete(&self, business_id: i64, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND business_id = $2", R::TABLE);

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
