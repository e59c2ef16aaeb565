pub mod aggregation_engine;
pub mod report_assembler;

pub use aggregation_engine::{
    winner, AggregationEngine, LedgerLines, DETAIL_TOP_PRODUCTS, MAX_DENSE_TREND_DAYS,
    MAX_RANKING_RESULTS,
};
pub use report_assembler::ReportAssembler;
