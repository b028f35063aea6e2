//! Dashboard configuration loaded from an optional JSON file.

use crate::data::{Category, DataSource, Granularity, Season, Weather};
use crate::stats::AnalysisSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown {kind} '{label}' in config")]
    UnknownCategory { kind: &'static str, label: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub day_file: String,
    pub hour_file: String,
    pub combined_file: String,
    pub granularity: Granularity,
    pub season_comparison: [String; 2],
    pub weather_comparison: [String; 2],
    /// Rows shown in the raw data table.
    pub raw_row_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            day_file: "day.csv".to_string(),
            hour_file: "hour.csv".to_string(),
            combined_file: "all_data.csv".to_string(),
            granularity: Granularity::Daily,
            season_comparison: ["Summer".to_string(), "Winter".to_string()],
            weather_comparison: ["Clear".to_string(), "Cloudy/Misty".to_string()],
            raw_row_limit: 500,
        }
    }
}

impl DashboardConfig {
    pub fn data_source(&self) -> DataSource {
        DataSource::in_dir(
            &self.data_dir,
            &self.day_file,
            &self.hour_file,
            &self.combined_file,
        )
    }

    pub fn analysis_settings(&self) -> Result<AnalysisSettings, ConfigError> {
        let [s1, s2] = &self.season_comparison;
        let [w1, w2] = &self.weather_comparison;

        Ok(AnalysisSettings {
            granularity: self.granularity,
            season_pair: (lookup::<Season>("season", s1)?, lookup::<Season>("season", s2)?),
            weather_pair: (
                lookup::<Weather>("weather", w1)?,
                lookup::<Weather>("weather", w2)?,
            ),
        })
    }
}

fn lookup<C: Category>(kind: &'static str, label: &str) -> Result<C, ConfigError> {
    C::from_label(label).ok_or_else(|| ConfigError::UnknownCategory {
        kind,
        label: label.to_string(),
    })
}

/// Read the config at `path`, or fall back to defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No {} found, using default configuration", path.display());
        return Ok(DashboardConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DashboardConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config("/nonexistent/dashboard.json").unwrap();
        assert_eq!(config.day_file, "day.csv");
        assert_eq!(config.raw_row_limit, 500);

        let settings = config.analysis_settings().unwrap();
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "data_dir": "data", "granularity": "hourly", "season_comparison": ["Fall", "Spring"] }}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.granularity, Granularity::Hourly);
        assert_eq!(config.hour_file, "hour.csv");
        assert!(config.data_source().day.starts_with("data"));

        let settings = config.analysis_settings().unwrap();
        assert_eq!(settings.season_pair, (Season::Fall, Season::Spring));
        assert_eq!(settings.weather_pair, (Weather::Clear, Weather::CloudyMisty));
    }

    #[test]
    fn test_unknown_category() {
        let config = DashboardConfig {
            weather_comparison: ["Clear".to_string(), "Sunny".to_string()],
            ..DashboardConfig::default()
        };
        let err = config.analysis_settings().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory { kind: "weather", .. }));
    }

    #[test]
    fn test_unreadable_config() {
        // a directory exists but cannot be read as a file
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
