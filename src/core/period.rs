//! Reporting periods: ISO weeks, calendar months and explicit ranges.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-date interval scoping an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Explicit range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::invalid_period(format!(
                "start ({}) must be before or equal to end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// A single calendar day
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Monday..Sunday week containing `date`
    pub fn week_of(date: NaiveDate) -> Self {
        // weekday counted from Sunday = 0
        let weekday = i64::from(date.weekday().num_days_from_sunday());
        let monday = date - Duration::days((weekday + 6) % 7);
        Self {
            start: monday,
            end: monday + Duration::days(6),
        }
    }

    /// First..last day of the given month
    pub fn month_of(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AppError::invalid_period(format!("invalid month {:04}-{:02}", year, month))
        })?;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(|| {
                AppError::invalid_period(format!("month {:04}-{:02} out of range", year, month))
            })?;

        Ok(Self { start, end })
    }

    /// Number of calendar days in the period (both ends included)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date from `start` to `end`, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Parse a `YYYY-MM-DD` input
pub fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::invalid_period(format!("{} is required (format: YYYY-MM-DD)", field)))?;

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        AppError::invalid_period(format!(
            "invalid {} '{}', expected YYYY-MM-DD",
            field, value
        ))
    })
}

/// Week containing the reference `date`
pub fn resolve_week(date: Option<&str>) -> Result<ReportPeriod> {
    parse_date("date", date).map(ReportPeriod::week_of)
}

/// Calendar month from a `YYYY-MM` input
pub fn resolve_month(month: Option<&str>) -> Result<ReportPeriod> {
    let month = month
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::invalid_period("month is required (format: YYYY-MM)"))?;

    let malformed = || AppError::invalid_period(format!("invalid month '{}', expected YYYY-MM", month));

    let (year, month_num) = month.split_once('-').ok_or_else(malformed)?;
    if year.len() != 4 || month_num.is_empty() || month_num.len() > 2 {
        return Err(malformed());
    }
    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month_num: u32 = month_num.parse().map_err(|_| malformed())?;

    ReportPeriod::month_of(year, month_num)
}

/// Explicit `startDate`..`endDate` range
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<ReportPeriod> {
    let start = parse_date("startDate", start)?;
    let end = parse_date("endDate", end)?;
    ReportPeriod::new(start, end)
}
