//! Data module - loading, labelling, joining and filtering

pub mod category;
mod enricher;
mod filter;
mod loader;
pub(crate) mod merger;
mod record;
mod state;
mod view;

pub use category::{display_label, Category, Labels, Season, Weather, Weekday};
pub use enricher::enrich;
pub use filter::DateRange;
pub use loader::{parse_date, DataLoader, DataSource, LoadError, LoadedTables};
pub use merger::{merge, DayRow, HourRow, UnifiedRecord, UnifiedTable};
pub use record::{CategoryCodes, Coded, DailyRecord, Enriched, HourlyRecord, RiderCounts};
pub use state::{AppState, Dataset};
pub use view::{Granularity, Observation};
