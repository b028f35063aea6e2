//! CSV Data Loader Module
//! Reads the day, hour and combined datasets using Polars and converts
//! them into typed records.

use crate::data::record::{CategoryCodes, DailyRecord, HourlyRecord, RiderCounts};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DATE_COLUMN: &str = "dteday";

const DAY_COLUMNS: [&str; 8] = [
    DATE_COLUMN,
    "season",
    "weekday",
    "weathersit",
    "workingday",
    "casual",
    "registered",
    "cnt",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to read CSV {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{}: missing required column '{}'", .path.display(), .column)]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}: row {}, column '{}': {}", .path.display(), .row, .column, .reason)]
    Malformed {
        path: PathBuf,
        row: usize,
        column: String,
        reason: String,
    },
    #[error("{}: row {}: cannot parse date '{}'", .path.display(), .row, .value)]
    InvalidDate {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

/// Locations of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub day: PathBuf,
    pub hour: PathBuf,
    pub combined: PathBuf,
}

impl DataSource {
    pub fn in_dir(dir: impl AsRef<Path>, day: &str, hour: &str, combined: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            day: dir.join(day),
            hour: dir.join(hour),
            combined: dir.join(combined),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::in_dir(".", "day.csv", "hour.csv", "all_data.csv")
    }
}

/// The typed contents of the three input files.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub day: Vec<DailyRecord>,
    pub hour: Vec<HourlyRecord>,
    /// Row count of the pre-merged file; only used as a cross-check.
    pub combined_rows: usize,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Read all three files. Any failure aborts the whole load.
    pub fn load(source: &DataSource) -> Result<LoadedTables, LoadError> {
        let day = Self::load_day(&source.day)?;
        let hour = Self::load_hour(&source.hour)?;
        let combined_rows = Self::load_combined(&source.combined)?;

        Ok(LoadedTables {
            day,
            hour,
            combined_rows,
        })
    }

    pub fn load_day(path: &Path) -> Result<Vec<DailyRecord>, LoadError> {
        let df = Self::read_csv(path)?;
        let table = TypedColumns::extract(&df, path)?;

        let records: Vec<DailyRecord> = (0..df.height())
            .map(|i| table.daily(i))
            .collect::<Result<_, _>>()?;

        info!("Loaded {} daily rows from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn load_hour(path: &Path) -> Result<Vec<HourlyRecord>, LoadError> {
        let df = Self::read_csv(path)?;
        let table = TypedColumns::extract(&df, path)?;
        let hours = int_column(&df, path, "hr")?;

        let records: Vec<HourlyRecord> = (0..df.height())
            .map(|i| {
                let day = table.daily(i)?;
                let raw = required(path, i, "hr", hours[i])?;
                let hour = u8::try_from(raw)
                    .ok()
                    .filter(|h| *h < 24)
                    .ok_or_else(|| malformed(path, i, "hr", format!("hour {} outside 0-23", raw)))?;
                Ok(HourlyRecord {
                    date: day.date,
                    hour,
                    codes: day.codes,
                    working_day: day.working_day,
                    counts: day.counts,
                })
            })
            .collect::<Result<_, LoadError>>()?;

        info!("Loaded {} hourly rows from {}", records.len(), path.display());
        Ok(records)
    }

    /// Only the date column of the combined file is checked.
    pub fn load_combined(path: &Path) -> Result<usize, LoadError> {
        let df = Self::read_csv(path)?;
        let dates = date_column(&df, path)?;

        info!("Loaded {} combined rows from {}", dates.len(), path.display());
        Ok(dates.len())
    }

    fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
        if !path.is_file() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }

        let csv_error = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .map_err(csv_error)?
            .collect()
            .map_err(csv_error)?;

        // Blank lines come back as rows of nulls
        if df.column(DATE_COLUMN).is_ok() {
            df = df
                .lazy()
                .filter(col(DATE_COLUMN).is_not_null())
                .collect()
                .map_err(csv_error)?;
        }

        debug!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }
}

/// The day-level columns shared by the day and hour files.
struct TypedColumns<'a> {
    path: &'a Path,
    dates: Vec<NaiveDate>,
    season: Vec<Option<i64>>,
    weekday: Vec<Option<i64>>,
    weathersit: Vec<Option<i64>>,
    workingday: Vec<Option<i64>>,
    casual: Vec<Option<i64>>,
    registered: Vec<Option<i64>>,
    cnt: Vec<Option<i64>>,
}

impl<'a> TypedColumns<'a> {
    fn extract(df: &DataFrame, path: &'a Path) -> Result<Self, LoadError> {
        for column in DAY_COLUMNS {
            if df.column(column).is_err() {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        Ok(Self {
            path,
            dates: date_column(df, path)?,
            season: int_column(df, path, "season")?,
            weekday: int_column(df, path, "weekday")?,
            weathersit: int_column(df, path, "weathersit")?,
            workingday: int_column(df, path, "workingday")?,
            casual: int_column(df, path, "casual")?,
            registered: int_column(df, path, "registered")?,
            cnt: int_column(df, path, "cnt")?,
        })
    }

    fn daily(&self, i: usize) -> Result<DailyRecord, LoadError> {
        let path = self.path;
        let working_day = match required(path, i, "workingday", self.workingday[i])? {
            0 => false,
            1 => true,
            other => {
                return Err(malformed(
                    path,
                    i,
                    "workingday",
                    format!("expected 0 or 1, got {}", other),
                ))
            }
        };

        Ok(DailyRecord {
            date: self.dates[i],
            codes: CategoryCodes {
                season: required(path, i, "season", self.season[i])?,
                weekday: required(path, i, "weekday", self.weekday[i])?,
                weathersit: required(path, i, "weathersit", self.weathersit[i])?,
            },
            working_day,
            counts: RiderCounts {
                casual: count(path, i, "casual", self.casual[i])?,
                registered: count(path, i, "registered", self.registered[i])?,
                cnt: count(path, i, "cnt", self.cnt[i])?,
            },
        })
    }
}

fn malformed(path: &Path, row: usize, column: &str, reason: String) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        reason,
    }
}

fn required(path: &Path, row: usize, column: &str, value: Option<i64>) -> Result<i64, LoadError> {
    value.ok_or_else(|| malformed(path, row, column, "missing value".to_string()))
}

fn count(path: &Path, row: usize, column: &str, value: Option<i64>) -> Result<u64, LoadError> {
    let value = required(path, row, column, value)?;
    u64::try_from(value)
        .map_err(|_| malformed(path, row, column, format!("negative count {}", value)))
}

/// Integer column as `Option<i64>` per row. Non-integer cells are an error.
fn int_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<Option<i64>>, LoadError> {
    let column = df.column(name).map_err(|_| LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })?;

    // A header-only file infers every column as text
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    if !column.dtype().is_integer() {
        return Err(malformed(
            path,
            0,
            name,
            format!("expected integer column, found {}", column.dtype()),
        ));
    }

    let casted = column
        .cast(&DataType::Int64)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let values = casted
        .as_materialized_series()
        .i64()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(values.into_iter().collect())
}

fn date_column(df: &DataFrame, path: &Path) -> Result<Vec<NaiveDate>, LoadError> {
    let column = df.column(DATE_COLUMN).map_err(|_| LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: DATE_COLUMN.to_string(),
    })?;

    let as_text = column
        .cast(&DataType::String)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let values = as_text
        .as_materialized_series()
        .str()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let text = value.unwrap_or_default();
            parse_date(text).ok_or_else(|| LoadError::InvalidDate {
                path: path.to_path_buf(),
                row,
                value: text.to_string(),
            })
        })
        .collect()
}

/// Accepts `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 1);
        assert_eq!(parse_date("2011-01-01"), expected);
        assert_eq!(parse_date(" 2011-01-01 "), expected);
        assert_eq!(parse_date("2011-01-01 00:00:00"), expected);
        assert_eq!(parse_date("01/01/2011"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_missing_file() {
        let err = DataLoader::load_day(Path::new("/nonexistent/day.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Missing(_)));
    }

    #[test]
    fn test_default_source_uses_fixed_names() {
        let source = DataSource::default();
        assert!(source.day.ends_with("day.csv"));
        assert!(source.hour.ends_with("hour.csv"));
        assert!(source.combined.ends_with("all_data.csv"));
    }
}
