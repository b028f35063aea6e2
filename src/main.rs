//! Bike Sharing Dashboard - interactive view of bike rental usage
//!
//! Reads `day.csv`, `hour.csv` and `all_data.csv` from the working directory
//! (or the directory named in `dashboard.json`) and opens the dashboard.

use anyhow::{anyhow, Context};
use bike_dashboard::config::{load_config, CONFIG_FILE};
use bike_dashboard::data::AppState;
use bike_dashboard::gui::DashboardApp;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(CONFIG_FILE).context("loading configuration")?;
    let settings = config
        .analysis_settings()
        .context("resolving comparison categories")?;

    // Without data there is no dashboard
    let mut state = AppState::new(config.data_source());
    if let Err(e) = state.populate() {
        error!("Failed to load data: {}", e);
        return Err(e).context("loading bike sharing data");
    }
    info!("Data loaded, opening dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Bike Sharing Dashboard"),
        ..Default::default()
    };

    let raw_row_limit = config.raw_row_limit;
    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                &state,
                settings,
                raw_row_limit,
            )))
        }),
    )
    .map_err(|e| anyhow!("dashboard window failed: {}", e))
}
