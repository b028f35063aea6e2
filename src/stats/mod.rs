//! Stats module - aggregation and descriptive statistics

pub mod aggregator;
mod calculator;
mod summary;

pub use aggregator::{
    percentage_difference, CategoryCount, Comparison, DailyTotal, SeasonWorkload,
    WeatherComparison, WeekdayDistribution,
};
pub use calculator::{BoxSummary, Describe, StatsCalculator};
pub use summary::{AnalysisSettings, DashboardSummary};
