//! Merger Module
//! Full outer join of the day and hour tables on the date.

use crate::data::record::{DailyRecord, Enriched, HourlyRecord};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub type DayRow = Enriched<DailyRecord>;
pub type HourRow = Enriched<HourlyRecord>;

/// Positions of the joined sides in the source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JoinedRow {
    pub date: NaiveDate,
    pub day: Option<usize>,
    pub hour: Option<usize>,
}

/// One row of the unified table. A side is `None` when it had no match.
#[derive(Debug, Clone, Copy)]
pub struct UnifiedRecord<'a> {
    pub date: NaiveDate,
    pub day: Option<&'a DayRow>,
    pub hour: Option<&'a HourRow>,
}

/// The joined view over the immutable enriched tables.
///
/// Filtering produces a new `UnifiedTable` that shares the source rows.
#[derive(Debug, Clone)]
pub struct UnifiedTable {
    pub(crate) day: Arc<[DayRow]>,
    pub(crate) hour: Arc<[HourRow]>,
    pub(crate) rows: Vec<JoinedRow>,
}

impl UnifiedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = UnifiedRecord<'_>> + '_ {
        self.rows.iter().map(|row| self.resolve(row))
    }

    pub fn get(&self, index: usize) -> Option<UnifiedRecord<'_>> {
        self.rows.get(index).map(|row| self.resolve(row))
    }

    /// Earliest and latest date in the table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Number of rows in the underlying day and hour tables.
    pub fn source_sizes(&self) -> (usize, usize) {
        (self.day.len(), self.hour.len())
    }

    pub(crate) fn with_rows(&self, rows: Vec<JoinedRow>) -> Self {
        Self {
            day: Arc::clone(&self.day),
            hour: Arc::clone(&self.hour),
            rows,
        }
    }

    fn resolve(&self, row: &JoinedRow) -> UnifiedRecord<'_> {
        UnifiedRecord {
            date: row.date,
            day: row.day.and_then(|i| self.day.get(i)),
            hour: row.hour.and_then(|i| self.hour.get(i)),
        }
    }
}

/// Join the enriched tables on the date.
///
/// Every day row is paired with each hour row of its date, or appears alone.
/// Hour rows whose date has no day row follow, in hour-table order.
pub fn merge(day: Vec<DayRow>, hour: Vec<HourRow>) -> UnifiedTable {
    let mut hours_by_date: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
    for (idx, row) in hour.iter().enumerate() {
        hours_by_date.entry(row.date).or_default().push(idx);
    }

    let mut rows = Vec::with_capacity(day.len().max(hour.len()));
    let mut day_dates: HashSet<NaiveDate> = HashSet::with_capacity(day.len());

    for (day_idx, row) in day.iter().enumerate() {
        day_dates.insert(row.date);
        match hours_by_date.get(&row.date) {
            Some(hour_indices) => {
                rows.extend(hour_indices.iter().map(|&hour_idx| JoinedRow {
                    date: row.date,
                    day: Some(day_idx),
                    hour: Some(hour_idx),
                }));
            }
            None => rows.push(JoinedRow {
                date: row.date,
                day: Some(day_idx),
                hour: None,
            }),
        }
    }

    rows.extend(
        hour.iter()
            .enumerate()
            .filter(|(_, row)| !day_dates.contains(&row.date))
            .map(|(hour_idx, row)| JoinedRow {
                date: row.date,
                day: None,
                hour: Some(hour_idx),
            }),
    );

    UnifiedTable {
        day: Arc::from(day),
        hour: Arc::from(hour),
        rows,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::data::enricher::enrich;
    use crate::data::record::{CategoryCodes, RiderCounts};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn counts(casual: u64, registered: u64) -> RiderCounts {
        RiderCounts {
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    pub fn day_row(date: NaiveDate, season: i64, weathersit: i64, counts: RiderCounts) -> DailyRecord {
        DailyRecord {
            date,
            codes: CategoryCodes {
                season,
                weekday: i64::from(chrono::Datelike::weekday(&date).num_days_from_sunday()),
                weathersit,
            },
            working_day: !matches!(
                chrono::Datelike::weekday(&date),
                chrono::Weekday::Sat | chrono::Weekday::Sun
            ),
            counts,
        }
    }

    pub fn hour_row(date: NaiveDate, hour: u8, weathersit: i64, counts: RiderCounts) -> HourlyRecord {
        let day = day_row(date, 1, weathersit, counts);
        HourlyRecord {
            date,
            hour,
            codes: day.codes,
            working_day: day.working_day,
            counts,
        }
    }

    pub fn table(day: Vec<DailyRecord>, hour: Vec<HourlyRecord>) -> UnifiedTable {
        merge(enrich(day), enrich(hour))
    }
}
