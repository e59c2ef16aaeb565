// Read-only aggregate queries behind every report.
//
// Money sums are NUMERIC and decode straight into `Decimal`; every SUM is
// wrapped in COALESCE so an empty period reads as zero, never NULL.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core::{ReportPeriod, Result};
use crate::modules::reports::models::{
    BusinessTotals, DailyTotal, ExpenseLine, ProductActivity, ProductionLine, SaleLine, TopProduct,
};

/// Which tenants an aggregate covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    Business(i64),
    /// Every tenant; privileged reports only
    All,
}

impl TenantScope {
    pub fn business_id(&self) -> Option<i64> {
        match self {
            TenantScope::Business(id) => Some(*id),
            TenantScope::All => None,
        }
    }
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Σ quantity × unit_price
    async fn sum_sales(&self, scope: TenantScope, period: ReportPeriod) -> Result<Decimal>;

    /// Σ amount
    async fn sum_expenses(&self, scope: TenantScope, period: ReportPeriod) -> Result<Decimal>;

    /// Distinct tenants with at least one sale in the period
    async fn count_active_businesses(&self, period: ReportPeriod) -> Result<i64>;

    /// One row per catalog product of the business, zero-filled
    async fn product_activity(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProductActivity>>;

    /// Sales per date, dates without sales omitted
    async fn daily_sales_totals(&self, business_id: i64, period: ReportPeriod)
        -> Result<Vec<DailyTotal>>;

    /// Expenses per date, dates without expenses omitted
    async fn daily_expense_totals(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<DailyTotal>>;

    /// Tenants by sales descending, then id ascending; at most `limit`
    async fn business_totals(&self, period: ReportPeriod, limit: i64) -> Result<Vec<BusinessTotals>>;

    async fn sale_lines(&self, business_id: i64, period: ReportPeriod) -> Result<Vec<SaleLine>>;

    async fn expense_lines(&self, business_id: i64, period: ReportPeriod)
        -> Result<Vec<ExpenseLine>>;

    async fn production_lines(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProductionLine>>;

    /// Products by revenue descending; `None` returns every sold product
    async fn top_products(
        &self,
        business_id: i64,
        period: ReportPeriod,
        limit: Option<i64>,
    ) -> Result<Vec<TopProduct>>;
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn sum_sales(&self, scope: TenantScope, period: ReportPeriod) -> Result<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(quantity * unit_price), 0)
            FROM daily_sales
            WHERE ($1::BIGINT IS NULL OR business_id = $1)
              AND date BETWEEN $2 AND $3
            "#,
        )
        .bind(scope.business_id())
        .bind(period.start)
        .bind(period.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn sum_expenses(&self, scope: TenantScope, period: ReportPeriod) -> Result<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE ($1::BIGINT IS NULL OR business_id = $1)
              AND date BETWEEN $2 AND $3
            "#,
        )
        .bind(scope.business_id())
        .bind(period.start)
        .bind(period.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count_active_businesses(&self, period: ReportPeriod) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT business_id) FROM daily_sales WHERE date BETWEEN $1 AND $2",
        )
        .bind(period.start)
        .bind(period.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn product_activity(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProductActivity>> {
        // Sales and production are grouped per product in their own
        // subqueries; joining raw rows would multiply them.
        let rows = sqlx::query_as::<_, ProductActivity>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                COALESCE(s.quantity_sold, 0)::BIGINT AS quantity_sold,
                COALESCE(s.total_sales, 0) AS total_sales,
                COALESCE(pr.production_cost, 0) AS production_cost
            FROM products p
            LEFT JOIN (
                SELECT product_id,
                       SUM(quantity) AS quantity_sold,
                       SUM(quantity * unit_price) AS total_sales
                FROM daily_sales
                WHERE business_id = $1 AND date BETWEEN $2 AND $3
                GROUP BY product_id
            ) s ON s.product_id = p.id
            LEFT JOIN (
                SELECT product_id,
                       SUM(quantity * unit_cost) AS production_cost
                FROM daily_production
                WHERE business_id = $1 AND date BETWEEN $2 AND $3
                GROUP BY product_id
            ) pr ON pr.product_id = p.id
            WHERE p.business_id = $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn daily_sales_totals(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<DailyTotal>> {
        let rows = sqlx::query_as::<_, DailyTotal>(
            r#"
            SELECT date, SUM(quantity * unit_price) AS total
            FROM daily_sales
            WHERE business_id = $1 AND date BETWEEN $2 AND $3
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn daily_expense_totals(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<DailyTotal>> {
        let rows = sqlx::query_as::<_, DailyTotal>(
            r#"
            SELECT date, SUM(amount) AS total
            FROM expenses
            WHERE business_id = $1 AND date BETWEEN $2 AND $3
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn business_totals(&self, period: ReportPeriod, limit: i64) -> Result<Vec<BusinessTotals>> {
        let rows = sqlx::query_as::<_, BusinessTotals>(
            r#"
            SELECT
                b.id,
                b.name,
                COALESCE(s.total, 0) AS sales,
                COALESCE(e.total, 0) AS expenses
            FROM businesses b
            LEFT JOIN (
                SELECT business_id, SUM(quantity * unit_price) AS total
                FROM daily_sales
                WHERE date BETWEEN $1 AND $2
                GROUP BY business_id
            ) s ON s.business_id = b.id
            LEFT JOIN (
                SELECT business_id, SUM(amount) AS total
                FROM expenses
                WHERE date BETWEEN $1 AND $2
                GROUP BY business_id
            ) e ON e.business_id = b.id
            ORDER BY sales DESC, b.id ASC
            LIMIT $3
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn sale_lines(&self, business_id: i64, period: ReportPeriod) -> Result<Vec<SaleLine>> {
        let rows = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT
                ds.id,
                ds.date,
                p.name AS product_name,
                ds.quantity,
                ds.unit_price,
                ds.quantity * ds.unit_price AS total
            FROM daily_sales ds
            JOIN products p ON p.id = ds.product_id
            WHERE ds.business_id = $1 AND ds.date BETWEEN $2 AND $3
            ORDER BY ds.date ASC, p.name ASC, ds.id ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn expense_lines(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ExpenseLine>> {
        let rows = sqlx::query_as::<_, ExpenseLine>(
            r#"
            SELECT id, date, description, amount
            FROM expenses
            WHERE business_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn production_lines(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProductionLine>> {
        let rows = sqlx::query_as::<_, ProductionLine>(
            r#"
            SELECT
                dp.id,
                dp.date,
                p.name AS product_name,
                dp.quantity,
                dp.unit_cost,
                dp.quantity * dp.unit_cost AS total_cost
            FROM daily_production dp
            JOIN products p ON p.id = dp.product_id
            WHERE dp.business_id = $1 AND dp.date BETWEEN $2 AND $3
            ORDER BY dp.date ASC, p.name ASC, dp.id ASC
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn top_products(
        &self,
        business_id: i64,
        period: ReportPeriod,
        limit: Option<i64>,
    ) -> Result<Vec<TopProduct>> {
        // LIMIT NULL is no limit
        let rows = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT
                p.name,
                SUM(ds.quantity)::BIGINT AS total_quantity,
                SUM(ds.quantity * ds.unit_price) AS total_revenue
            FROM daily_sales ds
            JOIN products p ON p.id = ds.product_id
            WHERE ds.business_id = $1 AND ds.date BETWEEN $2 AND $3
            GROUP BY p.id, p.name
            ORDER BY total_revenue DESC, p.id ASC
            LIMIT $4
            "#,
        )
        .bind(business_id)
        .bind(period.start)
        .bind(period.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
