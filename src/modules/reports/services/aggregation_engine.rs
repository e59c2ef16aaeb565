use std::cmp::Ordering;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::{AppError, ReportPeriod, Result};
use crate::modules::reports::models::{
    merge_trend, BusinessRanking, ExpenseLine, GlobalSummary, PeriodSummary, ProductionLine,
    ProfitabilityRow, SaleLine, TopProduct, TrendDensity, TrendPoint,
};
use crate::modules::reports::repositories::{ReportRepository, TenantScope};

/// Upper bound accepted for `maxResults`
pub const MAX_RANKING_RESULTS: i64 = 100;

/// Longest period a gap-filled trend may cover
pub const MAX_DENSE_TREND_DAYS: i64 = 366;

/// Products listed in downloadable reports
pub const DETAIL_TOP_PRODUCTS: i64 = 5;

/// Raw rows of one tenant in a period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerLines {
    pub sales: Vec<SaleLine>,
    pub expenses: Vec<ExpenseLine>,
    pub production: Vec<ProductionLine>,
}

/// Read-only aggregates over a period.
///
/// The independent reads of one operation run concurrently on separate
/// pooled connections and no transaction spans them, so a write landing
/// between two reads can be reflected in one figure but not the other.
/// Every figure is exact for the instant it was read.
pub struct AggregationEngine {
    repo: Arc<dyn ReportRepository>,
    ranking_default_limit: i64,
}

impl AggregationEngine {
    pub fn new(repo: Arc<dyn ReportRepository>, ranking_default_limit: i64) -> Self {
        Self {
            repo,
            ranking_default_limit,
        }
    }

    /// Sales, expenses, profit and per-day averages
    pub async fn period_summary(
        &self,
        scope: TenantScope,
        period: ReportPeriod,
    ) -> Result<PeriodSummary> {
        let (total_sales, total_expenses) = tokio::try_join!(
            self.repo.sum_sales(scope, period),
            self.repo.sum_expenses(scope, period),
        )?;

        debug!(
            ?scope,
            start = %period.start,
            end = %period.end,
            %total_sales,
            %total_expenses,
            "Period summary computed"
        );

        Ok(PeriodSummary::from_totals(period, total_sales, total_expenses))
    }

    /// Every catalog product, most profitable first (ties by product id)
    pub async fn product_profitability(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProfitabilityRow>> {
        let mut rows: Vec<ProfitabilityRow> = self
            .repo
            .product_activity(business_id, period)
            .await?
            .into_iter()
            .map(ProfitabilityRow::from)
            .collect();

        rows.sort_by(by_profit_desc);
        Ok(rows)
    }

    /// Highest strictly positive profit, if any
    pub async fn most_profitable(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Option<ProfitabilityRow>> {
        let rows = self.product_profitability(business_id, period).await?;
        Ok(winner(rows))
    }

    pub async fn daily_trend(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<Vec<TrendPoint>> {
        if density == TrendDensity::Dense && period.days() > MAX_DENSE_TREND_DAYS {
            return Err(AppError::validation(format!(
                "fillGaps covers at most {} days, the period has {}",
                MAX_DENSE_TREND_DAYS,
                period.days()
            )));
        }

        let (sales, expenses) = tokio::try_join!(
            self.repo.daily_sales_totals(business_id, period),
            self.repo.daily_expense_totals(business_id, period),
        )?;

        Ok(merge_trend(&period, &sales, &expenses, density))
    }

    /// Totals across every tenant
    pub async fn global_summary(&self, period: ReportPeriod) -> Result<GlobalSummary> {
        let (total_sales, total_expenses, active_businesses) = tokio::try_join!(
            self.repo.sum_sales(TenantScope::All, period),
            self.repo.sum_expenses(TenantScope::All, period),
            self.repo.count_active_businesses(period),
        )?;

        info!(
            start = %period.start,
            end = %period.end,
            active_businesses,
            "Global summary computed"
        );

        Ok(GlobalSummary {
            total_sales,
            total_expenses,
            total_profit: total_sales - total_expenses,
            active_businesses,
        })
    }

    /// Tenants ranked by sales; `max_results` defaults to the configured limit
    pub async fn business_ranking(
        &self,
        period: ReportPeriod,
        max_results: Option<i64>,
    ) -> Result<Vec<BusinessRanking>> {
        let limit = max_results.unwrap_or(self.ranking_default_limit);
        if !(1..=MAX_RANKING_RESULTS).contains(&limit) {
            return Err(AppError::validation(format!(
                "maxResults must be between 1 and {}, got {}",
                MAX_RANKING_RESULTS, limit
            )));
        }

        let ranking = self
            .repo
            .business_totals(period, limit)
            .await?
            .into_iter()
            .map(BusinessRanking::from)
            .collect();

        Ok(ranking)
    }

    /// Best sellers by revenue; `None` returns every product sold
    pub async fn top_products(
        &self,
        business_id: i64,
        period: ReportPeriod,
        limit: Option<i64>,
    ) -> Result<Vec<TopProduct>> {
        self.repo.top_products(business_id, period, limit).await
    }

    pub async fn sale_lines(&self, business_id: i64, period: ReportPeriod) -> Result<Vec<SaleLine>> {
        self.repo.sale_lines(business_id, period).await
    }

    pub async fn expense_lines(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ExpenseLine>> {
        self.repo.expense_lines(business_id, period).await
    }

    pub async fn production_lines(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<Vec<ProductionLine>> {
        self.repo.production_lines(business_id, period).await
    }

    /// Sale, expense and production rows, each ordered by date
    pub async fn ledger_lines(&self, business_id: i64, period: ReportPeriod) -> Result<LedgerLines> {
        let (sales, expenses, production) = tokio::try_join!(
            self.repo.sale_lines(business_id, period),
            self.repo.expense_lines(business_id, period),
            self.repo.production_lines(business_id, period),
        )?;

        Ok(LedgerLines {
            sales,
            expenses,
            production,
        })
    }
}

fn by_profit_desc(a: &ProfitabilityRow, b: &ProfitabilityRow) -> Ordering {
    b.profit
        .cmp(&a.profit)
        .then_with(|| a.product_id.cmp(&b.product_id))
}

/// First row of a profit-ordered list, if it actually made money
pub fn winner(rows: Vec<ProfitabilityRow>) -> Option<ProfitabilityRow> {
    rows.into_iter()
        .min_by(by_profit_desc)
        .filter(|row| row.profit > Decimal::ZERO)
}
