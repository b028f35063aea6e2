//! Application State
//! Owns the loaded, enriched and merged dataset for one session.

use crate::data::enricher::enrich;
use crate::data::loader::{DataLoader, DataSource, LoadError};
use crate::data::merger::{merge, UnifiedTable};
use tracing::{info, warn};

/// Everything the per-interaction pipeline reads from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub unified: UnifiedTable,
    pub combined_rows: usize,
}

/// Populate-once holder of the session's dataset.
///
/// The first successful `populate` reads the files; later calls return the
/// same dataset without touching the filesystem.
pub struct AppState {
    source: DataSource,
    dataset: Option<Dataset>,
    loads: usize,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            dataset: None,
            loads: 0,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Load, enrich and merge on first use.
    pub fn populate(&mut self) -> Result<&Dataset, LoadError> {
        let dataset = match self.dataset.take() {
            Some(dataset) => dataset,
            None => self.load()?,
        };
        Ok(&*self.dataset.insert(dataset))
    }

    fn load(&mut self) -> Result<Dataset, LoadError> {
        let tables = DataLoader::load(&self.source)?;
        self.loads += 1;

        let (n_day, n_hour) = (tables.day.len(), tables.hour.len());
        let unified = merge(enrich(tables.day), enrich(tables.hour));
        info!(
            "Merged {} daily and {} hourly rows into {} unified rows",
            n_day,
            n_hour,
            unified.len()
        );
        if tables.combined_rows != unified.len() {
            warn!(
                "Combined file has {} rows, live merge produced {}",
                tables.combined_rows,
                unified.len()
            );
        }

        Ok(Dataset {
            unified,
            combined_rows: tables.combined_rows,
        })
    }

    /// The dataset, if `populate` has succeeded.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// How many times the files were actually read.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}
