//! Filter Module
//! Inclusive date-range selection over the unified table.

use crate::data::merger::UnifiedTable;
use chrono::NaiveDate;
use std::fmt;

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Always false when `start > end`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl UnifiedTable {
    /// Rows whose date lies in `range`, in their original order.
    pub fn filter(&self, range: DateRange) -> UnifiedTable {
        let rows = self
            .rows
            .iter()
            .filter(|row| range.contains(row.date))
            .copied()
            .collect();
        self.with_rows(rows)
    }
}
