//! Bike Sharing Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::data::{AppState, DateRange, UnifiedTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{AnalysisSettings, DashboardSummary};
use chrono::NaiveDate;
use egui::SidePanel;
use tracing::{info, warn};

/// Main application window.
pub struct DashboardApp {
    /// Full unified table; cloned from the populated `AppState`.
    unified: UnifiedTable,
    combined_rows: usize,
    settings: AnalysisSettings,
    raw_row_limit: usize,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    /// Build the window from an already populated state.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        state: &AppState,
        settings: AnalysisSettings,
        raw_row_limit: usize,
    ) -> Self {
        let (unified, combined_rows) = match state.dataset() {
            Some(dataset) => (dataset.unified.clone(), dataset.combined_rows),
            None => {
                warn!("Dashboard opened before data was loaded");
                (crate::data::merge(Vec::new(), Vec::new()), 0)
            }
        };

        let bounds = unified.date_bounds().map_or_else(
            || {
                let epoch = NaiveDate::default();
                DateRange::new(epoch, epoch)
            },
            |(start, end)| DateRange::new(start, end),
        );

        let mut app = Self {
            unified,
            combined_rows,
            settings,
            raw_row_limit,
            control_panel: ControlPanel::new(bounds),
            chart_viewer: ChartViewer::new(),
        };
        app.apply_range(bounds);
        app
    }

    /// Filter and aggregate for `range`. Runs on the UI thread.
    fn apply_range(&mut self, range: DateRange) {
        let filtered = self.unified.filter(range);
        let summary =
            DashboardSummary::from_filtered(&self.unified, &filtered, range, &self.settings);

        info!("Date range {} selected: {} rows", range, summary.row_count);
        self.control_panel.range = range;
        self.control_panel.set_status(&format!(
            "{} of {} rows selected (combined file: {} rows)",
            summary.row_count,
            self.unified.len(),
            self.combined_rows
        ));
        self.chart_viewer.set_summary(summary, filtered);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::RangeChanged(range) => self.apply_range(range),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.control_panel.show_raw, self.raw_row_limit);
        });
    }
}
