//! Dashboard Summary
//! Runs every aggregation once for a selected date range.

use crate::data::{DateRange, Granularity, Season, UnifiedTable, Weather};
use crate::stats::aggregator::{
    self, CategoryCount, Comparison, DailyTotal, SeasonWorkload, WeatherComparison,
    WeekdayDistribution,
};
use crate::stats::calculator::{Describe, StatsCalculator};
use tracing::debug;

/// Analysis choices resolved from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub granularity: Granularity,
    pub season_pair: (Season, Season),
    pub weather_pair: (Weather, Weather),
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Daily,
            season_pair: (Season::Summer, Season::Winter),
            weather_pair: (Weather::Clear, Weather::CloudyMisty),
        }
    }
}

/// All aggregates shown for one date range.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub range: DateRange,
    /// Unified rows inside the range.
    pub row_count: usize,
    /// Observations inside the range at the configured granularity.
    pub observation_count: usize,
    /// Dates covered by the category overview, `None` without data.
    pub overview_range: Option<DateRange>,
    pub daily_totals: Vec<DailyTotal>,
    pub weekday_distribution: Vec<WeekdayDistribution>,
    pub cnt_stats: Describe,
    pub season_counts: Vec<CategoryCount<Season>>,
    pub weather_counts: Vec<CategoryCount<Weather>>,
    pub season_workloads: Vec<SeasonWorkload>,
    pub season_pair: (Season, Season),
    pub season_comparison: Comparison,
    pub weather_comparison: WeatherComparison,
}

impl DashboardSummary {
    /// The trend, weekday spread and descriptive statistics follow the date
    /// range; the category overview always covers the full table.
    pub fn build(full: &UnifiedTable, range: DateRange, settings: &AnalysisSettings) -> Self {
        Self::from_filtered(full, &full.filter(range), range, settings)
    }

    /// Same as [`DashboardSummary::build`] for a table already filtered to `range`.
    pub fn from_filtered(
        full: &UnifiedTable,
        filtered: &UnifiedTable,
        range: DateRange,
        settings: &AnalysisSettings,
    ) -> Self {
        let selected = filtered.observations(settings.granularity);
        let overview = full.observations(settings.granularity);

        let daily_totals = aggregator::daily_totals(&filtered.daily_observations());
        let weekday_distribution = aggregator::weekday_distribution(&selected);
        let cnt_stats = StatsCalculator::describe(&aggregator::cnt_values(&selected));

        let season_counts = aggregator::count_by_season(&overview);
        let weather_counts = aggregator::count_by_weather(&overview);
        let season_workloads = aggregator::casual_per_working_day(&overview);
        let (first_season, second_season) = settings.season_pair;
        let season_comparison =
            aggregator::compare_seasons(&season_workloads, first_season, second_season);
        let (first_weather, second_weather) = settings.weather_pair;
        let weather_comparison =
            aggregator::registered_by_weather(&overview, first_weather, second_weather);

        debug!(
            "Summary for {}: {} rows, {} observations, {} dates",
            range,
            filtered.len(),
            selected.len(),
            daily_totals.len()
        );

        Self {
            range,
            row_count: filtered.len(),
            observation_count: selected.len(),
            overview_range: full
                .date_bounds()
                .map(|(start, end)| DateRange::new(start, end)),
            daily_totals,
            weekday_distribution,
            cnt_stats,
            season_counts,
            weather_counts,
            season_workloads,
            season_pair: settings.season_pair,
            season_comparison,
            weather_comparison,
        }
    }
}
