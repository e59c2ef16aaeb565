use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::core::ReportPeriod;

/// Totals of one tenant (or all tenants) over a period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: ReportPeriod,
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    pub days: i64,
    pub daily_average_sales: Decimal,
    pub daily_average_profit: Decimal,
}

impl PeriodSummary {
    pub fn from_totals(period: ReportPeriod, total_sales: Decimal, total_expenses: Decimal) -> Self {
        let profit = total_sales - total_expenses;
        let days = period.days();

        Self {
            period,
            total_sales,
            total_expenses,
            profit,
            days,
            daily_average_sales: daily_average(total_sales, days),
            daily_average_profit: daily_average(profit, days),
        }
    }
}

/// `value / days` to two decimal places, midpoint away from zero
pub fn daily_average(value: Decimal, days: i64) -> Decimal {
    if days <= 0 {
        return Decimal::ZERO;
    }
    (value / Decimal::from(days)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
