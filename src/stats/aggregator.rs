//! Aggregator Module
//! The fixed grouped summaries behind the dashboard charts.

use crate::data::{Category, Observation, Season, Weather, Weekday};
use crate::stats::calculator::{BoxSummary, StatsCalculator};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sum of `cnt` on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub cnt: u64,
}

/// All `cnt` values observed on one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayDistribution {
    pub weekday: Weekday,
    pub values: Vec<f64>,
    pub summary: Option<BoxSummary>,
}

/// Number of rows carrying one category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount<C> {
    pub category: C,
    pub rows: usize,
}

/// Casual riders per working day within one season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonWorkload {
    pub season: Season,
    pub working_days: u64,
    pub casual: u64,
    /// `None` when the season has no working days.
    pub casual_per_working_day: Option<f64>,
}

/// Outcome of comparing two category values.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Computed {
        first: f64,
        second: f64,
        percent: f64,
    },
    Undefined {
        message: String,
    },
}

impl Comparison {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Comparison::Computed { percent, .. } => Some(*percent),
            Comparison::Undefined { .. } => None,
        }
    }
}

/// Registered-rider totals for two weather situations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherComparison {
    pub first: Weather,
    pub second: Weather,
    /// Totals for whichever of the two situations occur, in `[first, second]` order.
    pub totals: Vec<(Weather, u64)>,
    pub comparison: Comparison,
}

/// `(a - b) / b * 100`, or `None` when `b` is zero or the result is not finite.
pub fn percentage_difference(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    let percent = (a - b) / b * 100.0;
    percent.is_finite().then_some(percent)
}

/// Sum of `cnt` per date, ascending by date.
pub fn daily_totals(observations: &[Observation]) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for obs in observations {
        *totals.entry(obs.date).or_default() += obs.counts.cnt;
    }
    totals
        .into_iter()
        .map(|(date, cnt)| DailyTotal { date, cnt })
        .collect()
}

/// `cnt` values grouped by weekday, Monday first. Weekdays without rows and
/// unknown weekday codes are left out.
pub fn weekday_distribution(observations: &[Observation]) -> Vec<WeekdayDistribution> {
    Weekday::DISPLAY_ORDER
        .iter()
        .filter_map(|&weekday| {
            let values: Vec<f64> = observations
                .iter()
                .filter(|obs| obs.labels.weekday == weekday)
                .map(|obs| obs.counts.cnt as f64)
                .collect();
            if values.is_empty() {
                return None;
            }
            let summary = StatsCalculator::box_summary(&values);
            Some(WeekdayDistribution {
                weekday,
                values,
                summary,
            })
        })
        .collect()
}

/// Row counts per known label of `key`, in code order.
pub fn count_by<C, F>(observations: &[Observation], key: F) -> Vec<CategoryCount<C>>
where
    C: Category,
    F: Fn(&Observation) -> C,
{
    C::KNOWN
        .iter()
        .map(|&category| CategoryCount {
            category,
            rows: observations.iter().filter(|obs| key(obs) == category).count(),
        })
        .filter(|count| count.rows > 0)
        .collect()
}

pub fn count_by_season(observations: &[Observation]) -> Vec<CategoryCount<Season>> {
    count_by(observations, |obs| obs.labels.season)
}

pub fn count_by_weather(observations: &[Observation]) -> Vec<CategoryCount<Weather>> {
    count_by(observations, |obs| obs.labels.weather)
}

/// Working-day and casual sums per season with their ratio.
pub fn casual_per_working_day(observations: &[Observation]) -> Vec<SeasonWorkload> {
    Season::KNOWN
        .iter()
        .filter_map(|&season| {
            let rows: Vec<&Observation> = observations
                .iter()
                .filter(|obs| obs.labels.season == season)
                .collect();
            if rows.is_empty() {
                return None;
            }

            let working_days = rows.iter().filter(|obs| obs.working_day).count() as u64;
            let casual = rows.iter().map(|obs| obs.counts.casual).sum::<u64>();
            let casual_per_working_day =
                (working_days > 0).then(|| casual as f64 / working_days as f64);

            Some(SeasonWorkload {
                season,
                working_days,
                casual,
                casual_per_working_day,
            })
        })
        .collect()
}

/// Percentage difference of two seasons' casual-per-working-day ratios.
pub fn compare_seasons(workloads: &[SeasonWorkload], first: Season, second: Season) -> Comparison {
    let ratio_of = |season: Season| -> Result<f64, String> {
        let name = season.label().unwrap_or("unknown season");
        let workload = workloads
            .iter()
            .find(|w| w.season == season)
            .ok_or_else(|| format!("No data for {}", name))?;
        workload
            .casual_per_working_day
            .ok_or_else(|| format!("{} has no working days, ratio is undefined", name))
    };

    let (a, b) = match (ratio_of(first), ratio_of(second)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(message), _) | (_, Err(message)) => return Comparison::Undefined { message },
    };

    match percentage_difference(a, b) {
        Some(percent) => Comparison::Computed {
            first: a,
            second: b,
            percent,
        },
        None => Comparison::Undefined {
            message: format!(
                "{} ratio is zero, percentage difference is undefined",
                second.label().unwrap_or("unknown season")
            ),
        },
    }
}

/// Registered riders per weather situation, restricted to `first` and
/// `second`. The percentage comparison is skipped when either is absent.
pub fn registered_by_weather(
    observations: &[Observation],
    first: Weather,
    second: Weather,
) -> WeatherComparison {
    let total_for = |weather: Weather| -> Option<u64> {
        let mut rows = observations
            .iter()
            .filter(|obs| obs.labels.weather == weather)
            .peekable();
        rows.peek()?;
        Some(rows.map(|obs| obs.counts.registered).sum())
    };

    let first_total = total_for(first);
    let second_total = total_for(second);

    let totals = [(first, first_total), (second, second_total)]
        .into_iter()
        .filter_map(|(weather, total)| total.map(|t| (weather, t)))
        .collect();

    let name = |weather: Weather| weather.label().unwrap_or("unknown weather");
    let comparison = match (first_total, second_total) {
        (Some(a), Some(b)) => match percentage_difference(a as f64, b as f64) {
            Some(percent) => Comparison::Computed {
                first: a as f64,
                second: b as f64,
                percent,
            },
            None => Comparison::Undefined {
                message: format!(
                    "No registered riders for '{}', percentage difference is undefined",
                    name(second)
                ),
            },
        },
        (None, _) => Comparison::Undefined {
            message: format!("No data for weather condition '{}'", name(first)),
        },
        (_, None) => Comparison::Undefined {
            message: format!("No data for weather condition '{}'", name(second)),
        },
    };

    WeatherComparison {
        first,
        second,
        totals,
        comparison,
    }
}

/// `cnt` of every observation as floats.
pub fn cnt_values(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|obs| obs.counts.cnt as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Labels, RiderCounts};

    fn obs(date: (i32, u32, u32), season: Season, weather: Weather, working: bool, casual: u64, registered: u64) -> Observation {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Observation {
            date,
            hour: None,
            labels: Labels {
                season,
                weekday: Weekday::from_code(
                    i64::from(chrono::Datelike::weekday(&date).num_days_from_sunday()),
                ),
                weather,
            },
            working_day: working,
            counts: RiderCounts {
                casual,
                registered,
                cnt: casual + registered,
            },
        }
    }

    #[test]
    fn test_percentage_difference() {
        assert_eq!(percentage_difference(120.0, 100.0), Some(20.0));
        assert_eq!(percentage_difference(50.0, 100.0), Some(-50.0));
        assert_eq!(percentage_difference(10.0, 0.0), None);
        assert_eq!(percentage_difference(f64::NAN, 1.0), None);
    }

    #[test]
    fn test_daily_totals_sum_per_date() {
        let rows = [
            obs((2011, 1, 2), Season::Spring, Weather::Clear, false, 10, 20),
            obs((2011, 1, 1), Season::Spring, Weather::Clear, false, 1, 2),
            obs((2011, 1, 2), Season::Spring, Weather::Clear, false, 5, 5),
        ];
        let totals = daily_totals(&rows);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].cnt, 3);
        assert_eq!(totals[1].date, NaiveDate::from_ymd_opt(2011, 1, 2).unwrap());
        assert_eq!(totals[1].cnt, 40);
    }

    #[test]
    fn test_weekday_distribution_keeps_values() {
        // 2011-01-03 and 2011-01-10 are Mondays, 2011-01-02 a Sunday
        let rows = [
            obs((2011, 1, 3), Season::Spring, Weather::Clear, true, 10, 0),
            obs((2011, 1, 10), Season::Spring, Weather::Clear, true, 30, 0),
            obs((2011, 1, 2), Season::Spring, Weather::Clear, false, 7, 0),
        ];
        let groups = weekday_distribution(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].weekday, Weekday::Monday);
        assert_eq!(groups[0].values, vec![10.0, 30.0]);
        assert_eq!(groups[1].weekday, Weekday::Sunday);
        assert!(groups[1].summary.is_some());
    }

    #[test]
    fn test_counts_skip_unknown_labels() {
        let rows = [
            obs((2011, 1, 1), Season::Winter, Weather::Clear, false, 1, 1),
            obs((2011, 1, 2), Season::Winter, Weather::CloudyMisty, false, 1, 1),
            obs((2011, 1, 3), Season::Unknown(9), Weather::Unknown(0), true, 1, 1),
            obs((2011, 1, 4), Season::Spring, Weather::Clear, true, 1, 1),
        ];

        let seasons = count_by_season(&rows);
        assert_eq!(
            seasons,
            vec![
                CategoryCount { category: Season::Spring, rows: 1 },
                CategoryCount { category: Season::Winter, rows: 2 },
            ]
        );
        let weather = count_by_weather(&rows);
        assert_eq!(weather.iter().map(|c| c.rows).sum::<usize>(), 3);
    }

    #[test]
    fn test_casual_per_working_day() {
        let rows = [
            obs((2011, 6, 1), Season::Summer, Weather::Clear, true, 100, 0),
            obs((2011, 6, 2), Season::Summer, Weather::Clear, true, 50, 0),
            obs((2011, 6, 4), Season::Summer, Weather::Clear, false, 300, 0),
            obs((2011, 12, 24), Season::Winter, Weather::Clear, false, 40, 0),
        ];
        let workloads = casual_per_working_day(&rows);

        assert_eq!(workloads.len(), 2);
        let summer = workloads[0];
        assert_eq!(summer.season, Season::Summer);
        assert_eq!(summer.working_days, 2);
        assert_eq!(summer.casual, 450);
        assert_eq!(summer.casual_per_working_day, Some(225.0));
        // no working days in winter: ratio undefined, not a panic
        assert_eq!(workloads[1].casual_per_working_day, None);
    }

    #[test]
    fn test_compare_seasons() {
        let workloads = [
            SeasonWorkload {
                season: Season::Summer,
                working_days: 1,
                casual: 120,
                casual_per_working_day: Some(120.0),
            },
            SeasonWorkload {
                season: Season::Winter,
                working_days: 2,
                casual: 200,
                casual_per_working_day: Some(100.0),
            },
        ];
        let cmp = compare_seasons(&workloads, Season::Summer, Season::Winter);
        assert_eq!(cmp.percent(), Some(20.0));

        let missing = compare_seasons(&workloads[..1], Season::Summer, Season::Winter);
        match missing {
            Comparison::Undefined { message } => assert!(message.contains("Winter")),
            other => panic!("expected undefined comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_compare_seasons_zero_denominator() {
        let workloads = [
            SeasonWorkload {
                season: Season::Summer,
                working_days: 1,
                casual: 10,
                casual_per_working_day: Some(10.0),
            },
            SeasonWorkload {
                season: Season::Winter,
                working_days: 3,
                casual: 0,
                casual_per_working_day: Some(0.0),
            },
        ];
        let cmp = compare_seasons(&workloads, Season::Summer, Season::Winter);
        assert_eq!(cmp.percent(), None);
    }

    #[test]
    fn test_registered_by_weather() {
        let rows = [
            obs((2011, 1, 1), Season::Spring, Weather::Clear, true, 0, 120),
            obs((2011, 1, 2), Season::Spring, Weather::CloudyMisty, true, 0, 60),
            obs((2011, 1, 3), Season::Spring, Weather::CloudyMisty, true, 0, 40),
            obs((2011, 1, 4), Season::Spring, Weather::LightRainSnow, true, 0, 999),
        ];
        let result = registered_by_weather(&rows, Weather::Clear, Weather::CloudyMisty);

        assert_eq!(
            result.totals,
            vec![(Weather::Clear, 120), (Weather::CloudyMisty, 100)]
        );
        assert_eq!(result.comparison.percent(), Some(20.0));
    }

    #[test]
    fn test_registered_by_weather_missing_category() {
        let rows = [obs((2011, 1, 1), Season::Spring, Weather::Clear, true, 0, 120)];
        let result = registered_by_weather(&rows, Weather::Clear, Weather::CloudyMisty);

        assert_eq!(result.totals, vec![(Weather::Clear, 120)]);
        match result.comparison {
            Comparison::Undefined { message } => assert!(message.contains("Cloudy/Misty")),
            other => panic!("expected undefined comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_totals(&[]).is_empty());
        assert!(weekday_distribution(&[]).is_empty());
        assert!(count_by_season(&[]).is_empty());
        assert!(casual_per_working_day(&[]).is_empty());
        let weather = registered_by_weather(&[], Weather::Clear, Weather::CloudyMisty);
        assert!(weather.totals.is_empty());
        assert_eq!(weather.comparison.percent(), None);
    }
}
