//! Observation Views
//! De-duplicated daily or hourly projections of a unified table.
//!
//! A day row joined against N hour rows appears N times in the unified
//! table. Aggregations never read the joined rows directly; they read one of
//! these views, where every source row is counted exactly once.

use crate::data::category::Labels;
use crate::data::merger::{DayRow, HourRow, UnifiedTable};
use crate::data::record::RiderCounts;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Which level of the data the aggregations run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Hourly,
}

/// A flat row consumed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub hour: Option<u8>,
    pub labels: Labels,
    pub working_day: bool,
    pub counts: RiderCounts,
}

impl From<&DayRow> for Observation {
    fn from(row: &DayRow) -> Self {
        Self {
            date: row.date,
            hour: None,
            labels: row.labels,
            working_day: row.working_day,
            counts: row.counts,
        }
    }
}

impl From<&HourRow> for Observation {
    fn from(row: &HourRow) -> Self {
        Self {
            date: row.date,
            hour: Some(row.hour),
            labels: row.labels,
            working_day: row.working_day,
            counts: row.counts,
        }
    }
}

impl UnifiedTable {
    pub fn observations(&self, granularity: Granularity) -> Vec<Observation> {
        match granularity {
            Granularity::Daily => self.daily_observations(),
            Granularity::Hourly => self.hourly_observations(),
        }
    }

    /// One observation per day row. Dates known only from hour rows are
    /// rolled up into a single observation summing their counts.
    pub fn daily_observations(&self) -> Vec<Observation> {
        let mut seen_days = HashSet::new();
        let mut seen_hours = HashSet::new();
        let mut rollup_pos: HashMap<NaiveDate, usize> = HashMap::new();
        let mut out: Vec<Observation> = Vec::new();

        for row in &self.rows {
            match (row.day, row.hour) {
                (Some(day_idx), _) => {
                    if seen_days.insert(day_idx) {
                        if let Some(day) = self.day.get(day_idx) {
                            out.push(Observation::from(day));
                        }
                    }
                }
                (None, Some(hour_idx)) => {
                    if !seen_hours.insert(hour_idx) {
                        continue;
                    }
                    let Some(hour) = self.hour.get(hour_idx) else {
                        continue;
                    };
                    match rollup_pos.get(&row.date) {
                        Some(&pos) => out[pos].counts += hour.counts,
                        None => {
                            rollup_pos.insert(row.date, out.len());
                            out.push(Observation {
                                hour: None,
                                ..Observation::from(hour)
                            });
                        }
                    }
                }
                (None, None) => {}
            }
        }

        out
    }

    /// One observation per hour row. Day rows without hours are not part of
    /// this view.
    pub fn hourly_observations(&self) -> Vec<Observation> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.hour)
            .filter(|idx| seen.insert(*idx))
            .filter_map(|idx| self.hour.get(idx))
            .map(Observation::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::merger::fixtures::*;

    #[test]
    fn test_daily_view_counts_day_once() {
        let d = date(2011, 1, 1);
        let unified = table(
            vec![day_row(d, 1, 1, counts(20, 80))],
            vec![
                hour_row(d, 0, 1, counts(10, 30)),
                hour_row(d, 1, 1, counts(10, 50)),
            ],
        );

        let daily = unified.daily_observations();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].counts.cnt, 100);
        assert_eq!(daily[0].hour, None);
    }

    #[test]
    fn test_daily_view_rolls_up_orphan_hours() {
        let d = date(2011, 1, 2);
        let unified = table(
            Vec::new(),
            vec![
                hour_row(d, 0, 1, counts(1, 2)),
                hour_row(d, 1, 2, counts(3, 4)),
            ],
        );

        let daily = unified.daily_observations();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].counts, counts(4, 6));
    }

    #[test]
    fn test_hourly_view() {
        let d = date(2011, 1, 1);
        let unified = table(
            vec![
                day_row(d, 1, 1, counts(1, 1)),
                day_row(date(2011, 1, 9), 1, 1, counts(1, 1)),
            ],
            vec![hour_row(d, 7, 1, counts(5, 5)), hour_row(d, 8, 1, counts(6, 6))],
        );

        let hourly = unified.observations(Granularity::Hourly);
        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly[0].hour, Some(7));
        assert_eq!(hourly[1].counts.cnt, 12);
    }

    #[test]
    fn test_hourly_view_deduplicates_repeated_joins() {
        let d = date(2011, 5, 5);
        let unified = table(
            vec![day_row(d, 2, 1, counts(1, 1)), day_row(d, 2, 1, counts(1, 1))],
            vec![hour_row(d, 3, 1, counts(2, 2))],
        );

        assert_eq!(unified.len(), 2);
        assert_eq!(unified.hourly_observations().len(), 1);
        assert_eq!(unified.daily_observations().len(), 2);
    }
}
