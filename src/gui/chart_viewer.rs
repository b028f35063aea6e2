//! Chart Viewer Widget
//! Central scrollable panel with the dashboard charts and summaries.

use crate::charts::ChartPlotter;
use crate::data::{display_label, UnifiedRecord, UnifiedTable};
use crate::stats::{Comparison, DashboardSummary, Describe};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

/// Renders one `DashboardSummary`.
#[derive(Default)]
pub struct ChartViewer {
    summary: Option<DashboardSummary>,
    /// Filtered rows for the raw data table.
    rows: Option<UnifiedTable>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_summary(&mut self, summary: DashboardSummary, rows: UnifiedTable) {
        self.summary = Some(summary);
        self.rows = Some(rows);
    }

    pub fn show(&self, ui: &mut egui::Ui, show_raw: bool, raw_row_limit: usize) {
        let Some(summary) = &self.summary else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Bike Sharing Dashboard 🚲");
                ui.label(format!("Data from {}", summary.range));
                ui.label(format!("Number of rows: {}", summary.row_count));
                ui.label(format!("Observations analysed: {}", summary.observation_count));
                ui.add_space(SECTION_SPACING);

                section(ui, "Total Rentals per Day");
                ChartPlotter::draw_trend_chart(ui, &summary.daily_totals);

                section(ui, "Rental Distribution by Day of Week");
                ChartPlotter::draw_weekday_boxplot(ui, &summary.weekday_distribution);

                section(ui, "Summary Statistics");
                Self::draw_describe(ui, &summary.cnt_stats);

                if show_raw {
                    section(ui, "Raw Data");
                    if let Some(rows) = &self.rows {
                        Self::draw_raw_table(ui, rows, raw_row_limit);
                    }
                }

                section(ui, &overview_title("Season and Weather Distribution", summary));
                ui.columns(2, |cols| {
                    cols[0].label(RichText::new("Seasons").strong());
                    ChartPlotter::draw_histogram(&mut cols[0], "season_hist", &summary.season_counts);
                    cols[1].label(RichText::new("Weather").strong());
                    ChartPlotter::draw_histogram(&mut cols[1], "weather_hist", &summary.weather_counts);
                });

                section(ui, &overview_title("Total Rentals by Season", summary));
                ChartPlotter::draw_horizontal_counts(ui, "season_barh", &summary.season_counts);

                section(ui, &overview_title("Total Rentals by Weather", summary));
                ChartPlotter::draw_horizontal_counts(ui, "weather_barh", &summary.weather_counts);

                section(ui, &overview_title("Casual Riders per Working Day by Season", summary));
                ChartPlotter::draw_workload_chart(ui, &summary.season_workloads);
                Self::draw_workload_table(ui, summary);
                Self::draw_season_comparison(ui, summary);

                section(ui, &overview_title("Registered Rentals by Weather", summary));
                Self::draw_weather_section(ui, summary);
            });
    }

    fn draw_describe(ui: &mut egui::Ui, stats: &Describe) {
        egui::Grid::new("cnt_describe")
            .striped(true)
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label(RichText::new("").strong());
                ui.label(RichText::new("cnt").strong());
                ui.end_row();
                for (name, value) in stats.rows() {
                    ui.label(name);
                    ui.label(format_stat(value));
                    ui.end_row();
                }
            });
    }

    fn draw_workload_table(ui: &mut egui::Ui, summary: &DashboardSummary) {
        ui.add_space(8.0);
        egui::Grid::new("season_workloads")
            .striped(true)
            .min_col_width(90.0)
            .show(ui, |ui| {
                for header in ["Season", "Working days", "Casual", "Casual / working day"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for w in &summary.season_workloads {
                    ui.label(display_label(&w.season));
                    ui.label(w.working_days.to_string());
                    ui.label(w.casual.to_string());
                    ui.label(
                        w.casual_per_working_day
                            .map(|r| format!("{:.2}", r))
                            .unwrap_or_else(|| "undefined".to_string()),
                    );
                    ui.end_row();
                }
            });
    }

    fn draw_season_comparison(ui: &mut egui::Ui, summary: &DashboardSummary) {
        let (first_season, second_season) = summary.season_pair;

        ui.add_space(8.0);
        ui.label(RichText::new("Season Comparison").strong().size(14.0));
        match &summary.season_comparison {
            Comparison::Computed {
                first,
                second,
                percent,
            } => {
                ui.label(format!(
                    "Casual riders per working day in {}: {:.2}",
                    display_label(&first_season),
                    first
                ));
                ui.label(format!(
                    "Casual riders per working day in {}: {:.2}",
                    display_label(&second_season),
                    second
                ));
                let color = if *percent < 0.0 {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::from_rgb(40, 167, 69)
                };
                ui.label(
                    RichText::new(format!("Percentage difference: {:.2}%", percent))
                        .size(16.0)
                        .color(color),
                );
            }
            Comparison::Undefined { message } => {
                ui.label(RichText::new(message).color(Color32::GRAY));
            }
        }
    }

    fn draw_weather_section(ui: &mut egui::Ui, summary: &DashboardSummary) {
        let weather = &summary.weather_comparison;
        match &weather.comparison {
            Comparison::Computed {
                first,
                second,
                percent,
            } => {
                ChartPlotter::draw_weather_chart(ui, weather);
                ui.label(format!(
                    "Total rentals in {} weather: {:.2}",
                    display_label(&weather.first),
                    first
                ));
                ui.label(format!(
                    "Total rentals in {} weather: {:.2}",
                    display_label(&weather.second),
                    second
                ));
                ui.label(format!("Percentage difference: {:.2}%", percent));
            }
            Comparison::Undefined { message } => {
                if !weather.totals.is_empty() {
                    ChartPlotter::draw_weather_chart(ui, weather);
                }
                ui.label(RichText::new(message).color(Color32::GRAY));
            }
        }
    }

    fn draw_raw_table(ui: &mut egui::Ui, rows: &UnifiedTable, limit: usize) {
        ui.label(format!(
            "Showing {} of {} rows",
            rows.len().min(limit),
            rows.len()
        ));

        ScrollArea::both()
            .id_salt("raw_rows")
            .max_height(320.0)
            .show(ui, |ui| {
                egui::Grid::new("raw_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        for header in RAW_HEADERS {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for record in rows.iter().take(limit) {
                            for cell in raw_cells(&record) {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

const RAW_HEADERS: [&str; 10] = [
    "dteday",
    "hr",
    "season_name",
    "weekday_name",
    "weather_name",
    "workingday",
    "casual",
    "registered",
    "cnt",
    "day_cnt",
];

/// Cells of one raw row; the hour side wins when both sides are present,
/// `day_cnt` always shows the day-level total.
fn raw_cells(record: &UnifiedRecord<'_>) -> [String; 10] {
    let hour = record.hour.map(|h| h.hour.to_string()).unwrap_or_default();
    let (labels, working_day, counts) = match (record.hour, record.day) {
        (Some(h), _) => (h.labels, h.working_day, h.counts),
        (None, Some(d)) => (d.labels, d.working_day, d.counts),
        (None, None) => return Default::default(),
    };

    [
        record.date.to_string(),
        hour,
        display_label(&labels.season).to_string(),
        display_label(&labels.weekday).to_string(),
        display_label(&labels.weather).to_string(),
        u8::from(working_day).to_string(),
        counts.casual.to_string(),
        counts.registered.to_string(),
        counts.cnt.to_string(),
        record
            .day
            .map(|d| d.counts.cnt.to_string())
            .unwrap_or_default(),
    ]
}

/// Section title for charts that ignore the selected range.
fn overview_title(title: &str, summary: &DashboardSummary) -> String {
    match summary.overview_range {
        Some(range) => format!("{} (all dates: {})", title, range),
        None => title.to_string(),
    }
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(SECTION_SPACING);
    ui.separator();
    ui.label(RichText::new(title).size(16.0).strong());
    ui.add_space(5.0);
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.3}", value)
    }
}
