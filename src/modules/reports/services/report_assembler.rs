use tracing::info;

use crate::core::{ReportPeriod, Result};
use crate::modules::reports::models::{
    AllProducts, BusinessRankingReport, DailyReport, DailyTrendReport, DetailedMonthlyReport,
    DetailedMostProfitableReport, DetailedProfitabilityReport, DetailedReport,
    DetailedTrendReport, DetailedWeeklyReport, GlobalSummaryReport, LedgerDetails, MonthlyDetails,
    MonthlyFigures, MonthlyReport, MonthlySummary, MostProfitableReport, MostProfitableSummary,
    ProductProfitabilityReport, ProfitabilityDetails, ProfitabilitySummary, TrendDensity,
    TrendSummary, WeeklyFigures, WeeklyReport,
};
use crate::modules::reports::repositories::TenantScope;
use crate::modules::reports::services::aggregation_engine::{
    winner, AggregationEngine, DETAIL_TOP_PRODUCTS,
};

/// Builds report documents out of engine results
pub struct ReportAssembler {
    engine: AggregationEngine,
}

impl ReportAssembler {
    pub fn new(engine: AggregationEngine) -> Self {
        Self { engine }
    }

    pub async fn weekly(&self, business_id: i64, period: ReportPeriod) -> Result<WeeklyReport> {
        let summary = self
            .engine
            .period_summary(TenantScope::Business(business_id), period)
            .await?;

        Ok(WeeklyReport {
            period,
            figures: WeeklyFigures::from(&summary),
        })
    }

    pub async fn monthly(&self, business_id: i64, period: ReportPeriod) -> Result<MonthlyReport> {
        let summary = self
            .engine
            .period_summary(TenantScope::Business(business_id), period)
            .await?;

        Ok(MonthlyReport {
            month: month_label(&period),
            period,
            figures: MonthlyFigures::from(&summary),
        })
    }

    /// One day or an explicit range, with every product sold
    pub async fn daily(&self, business_id: i64, period: ReportPeriod) -> Result<DailyReport> {
        let (summary, top_products) = tokio::try_join!(
            self.engine
                .period_summary(TenantScope::Business(business_id), period),
            self.engine.top_products(business_id, period, None),
        )?;

        Ok(DailyReport {
            period,
            total_sales: summary.total_sales,
            total_expenses: summary.total_expenses,
            daily_profit: summary.profit,
            daily_average_sales: summary.daily_average_sales,
            daily_average_profit: summary.daily_average_profit,
            days_in_period: summary.days,
            top_products,
        })
    }

    pub async fn product_profitability(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<ProductProfitabilityReport> {
        let products = self
            .engine
            .product_profitability(business_id, period)
            .await?;

        Ok(ProductProfitabilityReport { period, products })
    }

    pub async fn daily_trend(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<DailyTrendReport> {
        let daily_data = self
            .engine
            .daily_trend(business_id, period, density)
            .await?;

        Ok(DailyTrendReport { period, daily_data })
    }

    pub async fn most_profitable(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<MostProfitableReport> {
        let product = self.engine.most_profitable(business_id, period).await?;
        Ok(MostProfitableReport::new(period, product))
    }

    pub async fn detailed_weekly(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<DetailedWeeklyReport> {
        let (summary, details) = tokio::try_join!(
            self.engine
                .period_summary(TenantScope::Business(business_id), period),
            self.ledger_details(business_id, period, density),
        )?;

        log_detailed("weekly", business_id, &period);
        Ok(DetailedReport {
            period,
            summary: WeeklyFigures::from(&summary),
            details,
        })
    }

    pub async fn detailed_monthly(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<DetailedMonthlyReport> {
        let (summary, lines, daily_summary, top_products) = tokio::try_join!(
            self.engine
                .period_summary(TenantScope::Business(business_id), period),
            self.engine.ledger_lines(business_id, period),
            self.engine.daily_trend(business_id, period, density),
            self.engine
                .top_products(business_id, period, Some(DETAIL_TOP_PRODUCTS)),
        )?;

        log_detailed("monthly", business_id, &period);
        Ok(DetailedReport {
            period,
            summary: MonthlySummary {
                month: month_label(&period),
                figures: MonthlyFigures::from(&summary),
            },
            details: MonthlyDetails {
                daily_sales: lines.sales,
                daily_expenses: lines.expenses,
                daily_production: lines.production,
                daily_summary,
                top_products,
            },
        })
    }

    pub async fn detailed_product_profitability(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<DetailedProfitabilityReport> {
        let (products, sales_by_day, production_by_day) = tokio::try_join!(
            self.engine.product_profitability(business_id, period),
            self.engine.sale_lines(business_id, period),
            self.engine.production_lines(business_id, period),
        )?;

        log_detailed("product-profitability", business_id, &period);
        Ok(DetailedReport {
            period,
            summary: ProfitabilitySummary { products },
            details: ProfitabilityDetails {
                sales_by_day,
                production_by_day,
            },
        })
    }

    pub async fn detailed_daily_trend(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<DetailedTrendReport> {
        let details = self.ledger_details(business_id, period, density).await?;

        log_detailed("daily-trend", business_id, &period);
        Ok(DetailedReport {
            period,
            summary: TrendSummary {
                daily_data: details.daily_summary.clone(),
            },
            details,
        })
    }

    pub async fn detailed_most_profitable(
        &self,
        business_id: i64,
        period: ReportPeriod,
    ) -> Result<DetailedMostProfitableReport> {
        let all_products = self
            .engine
            .product_profitability(business_id, period)
            .await?;
        // same snapshot for the winner and the list
        let most_profitable = winner(all_products.clone());
        let message = MostProfitableReport::new(period, most_profitable.clone()).message;

        log_detailed("most-profitable", business_id, &period);
        Ok(DetailedReport {
            period,
            summary: MostProfitableSummary {
                most_profitable,
                message,
            },
            details: AllProducts { all_products },
        })
    }

    pub async fn global_summary(&self, period: ReportPeriod) -> Result<GlobalSummaryReport> {
        let summary = self.engine.global_summary(period).await?;
        Ok(GlobalSummaryReport { period, summary })
    }

    pub async fn business_ranking(
        &self,
        period: ReportPeriod,
        max_results: Option<i64>,
    ) -> Result<BusinessRankingReport> {
        let businesses = self.engine.business_ranking(period, max_results).await?;
        Ok(BusinessRankingReport { period, businesses })
    }

    async fn ledger_details(
        &self,
        business_id: i64,
        period: ReportPeriod,
        density: TrendDensity,
    ) -> Result<LedgerDetails> {
        let (daily_sales, daily_expenses, daily_summary) = tokio::try_join!(
            self.engine.sale_lines(business_id, period),
            self.engine.expense_lines(business_id, period),
            self.engine.daily_trend(business_id, period, density),
        )?;

        Ok(LedgerDetails {
            daily_sales,
            daily_expenses,
            daily_summary,
        })
    }
}

fn month_label(period: &ReportPeriod) -> String {
    period.start.format("%Y-%m").to_string()
}

fn log_detailed(report: &str, business_id: i64, period: &ReportPeriod) {
    info!(
        report,
        business_id,
        start = %period.start,
        end = %period.end,
        "Detailed report assembled"
    );
}
