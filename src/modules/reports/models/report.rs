//! Report documents returned to clients and the spreadsheet exporter.
//!
//! Every value here is copied from engine output; nothing is recomputed.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::ReportPeriod;
use crate::modules::reports::models::{
    BusinessRanking, ExpenseLine, GlobalSummary, PeriodSummary, ProductionLine, ProfitabilityRow,
    SaleLine, TopProduct, TrendPoint,
};

pub const NO_PROFITABLE_PRODUCT: &str = "No profitable product in this period";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyFigures {
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub weekly_profit: Decimal,
    pub daily_average_sales: Decimal,
    pub daily_average_profit: Decimal,
}

impl From<&PeriodSummary> for WeeklyFigures {
    fn from(summary: &PeriodSummary) -> Self {
        Self {
            total_sales: summary.total_sales,
            total_expenses: summary.total_expenses,
            weekly_profit: summary.profit,
            daily_average_sales: summary.daily_average_sales,
            daily_average_profit: summary.daily_average_profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub period: ReportPeriod,
    #[serde(flatten)]
    pub figures: WeeklyFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFigures {
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub monthly_profit: Decimal,
    /// Profit per calendar day
    pub daily_average: Decimal,
    pub days_in_month: i64,
}

impl From<&PeriodSummary> for MonthlyFigures {
    fn from(summary: &PeriodSummary) -> Self {
        Self {
            total_sales: summary.total_sales,
            total_expenses: summary.total_expenses,
            monthly_profit: summary.profit,
            daily_average: summary.daily_average_profit,
            days_in_month: summary.days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// `YYYY-MM`
    pub month: String,
    pub period: ReportPeriod,
    #[serde(flatten)]
    pub figures: MonthlyFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub period: ReportPeriod,
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub daily_profit: Decimal,
    pub daily_average_sales: Decimal,
    pub daily_average_profit: Decimal,
    pub days_in_period: i64,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProfitabilityReport {
    pub period: ReportPeriod,
    pub products: Vec<ProfitabilityRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendReport {
    pub period: ReportPeriod,
    pub daily_data: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostProfitableReport {
    pub period: ReportPeriod,
    pub product: Option<ProfitabilityRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MostProfitableReport {
    pub fn new(period: ReportPeriod, product: Option<ProfitabilityRow>) -> Self {
        let message = product
            .is_none()
            .then(|| NO_PROFITABLE_PRODUCT.to_string());
        Self {
            period,
            product,
            message,
        }
    }
}

/// Downloadable variant: summary plus every row the exporter needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedReport<S, D> {
    pub period: ReportPeriod,
    pub summary: S,
    pub details: D,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDetails {
    pub daily_sales: Vec<SaleLine>,
    pub daily_expenses: Vec<ExpenseLine>,
    pub daily_summary: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDetails {
    pub daily_sales: Vec<SaleLine>,
    pub daily_expenses: Vec<ExpenseLine>,
    pub daily_production: Vec<ProductionLine>,
    pub daily_summary: Vec<TrendPoint>,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    #[serde(flatten)]
    pub figures: MonthlyFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilitySummary {
    pub products: Vec<ProfitabilityRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityDetails {
    pub sales_by_day: Vec<SaleLine>,
    pub production_by_day: Vec<ProductionLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub daily_data: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostProfitableSummary {
    pub most_profitable: Option<ProfitabilityRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllProducts {
    pub all_products: Vec<ProfitabilityRow>,
}

pub type DetailedWeeklyReport = DetailedReport<WeeklyFigures, LedgerDetails>;
pub type DetailedMonthlyReport = DetailedReport<MonthlySummary, MonthlyDetails>;
pub type DetailedProfitabilityReport = DetailedReport<ProfitabilitySummary, ProfitabilityDetails>;
pub type DetailedTrendReport = DetailedReport<TrendSummary, LedgerDetails>;
pub type DetailedMostProfitableReport = DetailedReport<MostProfitableSummary, AllProducts>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummaryReport {
    pub period: ReportPeriod,
    #[serde(flatten)]
    pub summary: GlobalSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRankingReport {
    pub period: ReportPeriod,
    pub businesses: Vec<BusinessRanking>,
}
