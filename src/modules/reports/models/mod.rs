pub mod detail_lines;
pub mod global;
pub mod period_summary;
pub mod profitability;
pub mod report;
pub mod trend;

pub use detail_lines::{ExpenseLine, ProductionLine, SaleLine, TopProduct};
pub use global::{BusinessRanking, BusinessTotals, GlobalSummary};
pub use period_summary::{daily_average, PeriodSummary};
pub use profitability::{ProductActivity, ProfitabilityRow};
pub use report::*;
pub use trend::{merge_trend, DailyTotal, TrendDensity, TrendPoint};
