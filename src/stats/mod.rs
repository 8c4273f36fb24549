//! Stats module - chart aggregates and box-plot statistics

mod aggregates;
mod calculator;

pub use aggregates::{CategoryShare, DashboardAggregates, Distribution, PairSeries, MONTH_LABELS};
pub use calculator::{BoxSummary, StatsCalculator};
