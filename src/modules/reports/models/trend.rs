use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::ReportPeriod;

/// Sum of one measure on one date
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub sales: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

impl TrendPoint {
    fn new(date: NaiveDate, sales: Decimal, expenses: Decimal) -> Self {
        Self {
            date,
            sales,
            expenses,
            profit: sales - expenses,
        }
    }
}

/// Which dates a trend reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendDensity {
    /// Only dates with at least one sale or expense
    #[default]
    Sparse,
    /// Every calendar date of the period, zero-filled
    Dense,
}

impl TrendDensity {
    pub fn from_fill_gaps(fill_gaps: Option<bool>) -> Self {
        if fill_gaps.unwrap_or(false) {
            TrendDensity::Dense
        } else {
            TrendDensity::Sparse
        }
    }
}

/// Merge per-date sales and expense totals into ascending trend points.
///
/// Totals outside `period` are dropped.
pub fn merge_trend(
    period: &ReportPeriod,
    sales: &[DailyTotal],
    expenses: &[DailyTotal],
    density: TrendDensity,
) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for day in sales.iter().filter(|d| period.contains(d.date)) {
        by_date.entry(day.date).or_default().0 += day.total;
    }
    for day in expenses.iter().filter(|d| period.contains(d.date)) {
        by_date.entry(day.date).or_default().1 += day.total;
    }

    match density {
        TrendDensity::Sparse => by_date
            .into_iter()
            .map(|(date, (sales, expenses))| TrendPoint::new(date, sales, expenses))
            .collect(),
        TrendDensity::Dense => period
            .dates()
            .map(|date| {
                let (sales, expenses) = by_date.get(&date).copied().unwrap_or_default();
                TrendPoint::new(date, sales, expenses)
            })
            .collect(),
    }
}
