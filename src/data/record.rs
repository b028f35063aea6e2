//! Record Types
//! Typed rows of the day and hour datasets.

use crate::data::category::{Category, Labels, Season, Weather, Weekday};
use chrono::NaiveDate;

/// Raw category codes as read from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCodes {
    pub season: i64,
    pub weekday: i64,
    pub weathersit: i64,
}

impl CategoryCodes {
    pub fn labels(&self) -> Labels {
        Labels {
            season: Season::from_code(self.season),
            weekday: Weekday::from_code(self.weekday),
            weather: Weather::from_code(self.weathersit),
        }
    }
}

/// Rider counts. `cnt` is taken as read, never recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiderCounts {
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl std::ops::AddAssign for RiderCounts {
    fn add_assign(&mut self, other: Self) {
        self.casual += other.casual;
        self.registered += other.registered;
        self.cnt += other.cnt;
    }
}

/// One row of the day dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub codes: CategoryCodes,
    pub working_day: bool,
    pub counts: RiderCounts,
}

/// One row of the hour dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub codes: CategoryCodes,
    pub working_day: bool,
    pub counts: RiderCounts,
}

/// Rows that carry category codes and can be labelled.
pub trait Coded {
    fn codes(&self) -> CategoryCodes;
}

impl Coded for DailyRecord {
    fn codes(&self) -> CategoryCodes {
        self.codes
    }
}

impl Coded for HourlyRecord {
    fn codes(&self) -> CategoryCodes {
        self.codes
    }
}

/// A record together with its derived labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Enriched<R> {
    pub record: R,
    pub labels: Labels,
}

impl<R> std::ops::Deref for Enriched<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}
