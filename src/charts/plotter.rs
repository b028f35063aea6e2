//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot.

use crate::data::Category;
use crate::stats::{
    CategoryCount, DailyTotal, SeasonWorkload, WeatherComparison, WeekdayDistribution,
};
use chrono::NaiveDate;
use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoint, PlotPoints, Points, Text,
};

pub const TREND_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Qualitative palette for category bars.
pub const PALETTE: [Color32; 8] = [
    Color32::from_rgb(27, 158, 119),
    Color32::from_rgb(217, 95, 2),
    Color32::from_rgb(117, 112, 179),
    Color32::from_rgb(231, 41, 138),
    Color32::from_rgb(102, 166, 30),
    Color32::from_rgb(230, 171, 2),
    Color32::from_rgb(166, 118, 29),
    Color32::from_rgb(102, 102, 102),
];

/// Season bar colors.
pub const SEASON_COLORS: [Color32; 4] = [
    Color32::from_rgb(255, 160, 122),
    Color32::from_rgb(152, 251, 152),
    Color32::from_rgb(222, 184, 135),
    Color32::from_rgb(135, 206, 250),
];

const CHART_HEIGHT: f32 = 280.0;

/// Creates the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Line chart of total rentals per date.
    pub fn draw_trend_chart(ui: &mut egui::Ui, totals: &[DailyTotal]) {
        let points: PlotPoints = totals
            .iter()
            .map(|t| [day_number(t.date), t.cnt as f64])
            .collect();

        Plot::new("daily_trend")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Rentals")
            .x_axis_formatter(|mark, _range| {
                date_from_day_number(mark.value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|_name, value| {
                let date = date_from_day_number(value.x)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                format!("{}\n{:.0} rentals", date, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .color(TREND_COLOR)
                        .width(1.5)
                        .name("Total rentals"),
                );
            });
    }

    /// Box plot of rentals per weekday.
    pub fn draw_weekday_boxplot(ui: &mut egui::Ui, groups: &[WeekdayDistribution]) {
        let x_labels: Vec<String> = groups
            .iter()
            .map(|g| g.weekday.label().unwrap_or("-").to_string())
            .collect();

        Plot::new("weekday_boxplot")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Day")
            .y_axis_label("Rentals")
            .x_axis_formatter(move |mark, _range| category_tick(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, group) in groups.iter().enumerate() {
                    let Some(summary) = group.summary else {
                        continue;
                    };
                    let color = Self::palette_color(i);
                    let name = group.weekday.label().unwrap_or("-");

                    let box_elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            summary.whisker_low,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            summary.whisker_high,
                        ),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(name));

                    // Outliers beyond the whiskers
                    let outliers: PlotPoints = group
                        .values
                        .iter()
                        .filter(|&&v| v < summary.whisker_low || v > summary.whisker_high)
                        .map(|&v| [i as f64, v])
                        .collect();
                    plot_ui.points(Points::new(outliers).radius(2.5).color(color));
                }
            });
    }

    /// Vertical bars of row counts per label, one bar per category.
    pub fn draw_histogram<C: Category>(ui: &mut egui::Ui, id: &str, counts: &[CategoryCount<C>]) {
        let x_labels: Vec<String> = counts
            .iter()
            .map(|c| c.category.label().unwrap_or("-").to_string())
            .collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.rows as f64)
                    .width(0.95)
                    .fill(TREND_COLOR)
                    .name(c.category.label().unwrap_or("-"))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT * 0.8)
            .allow_scroll(false)
            .y_axis_label("Rows")
            .x_axis_formatter(move |mark, _range| category_tick(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Horizontal bars of row counts per label.
    pub fn draw_horizontal_counts<C: Category>(
        ui: &mut egui::Ui,
        id: &str,
        counts: &[CategoryCount<C>],
    ) {
        let y_labels: Vec<String> = counts
            .iter()
            .map(|c| c.category.label().unwrap_or("-").to_string())
            .collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.rows as f64)
                    .width(0.6)
                    .fill(Self::palette_color(i))
                    .name(c.category.label().unwrap_or("-"))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT * 0.8)
            .allow_scroll(false)
            .x_axis_label("Rows")
            .y_axis_formatter(move |mark, _range| category_tick(&y_labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Casual riders per working day, one bar per season with its value on top.
    pub fn draw_workload_chart(ui: &mut egui::Ui, workloads: &[SeasonWorkload]) {
        let x_labels: Vec<String> = workloads
            .iter()
            .map(|w| w.season.label().unwrap_or("-").to_string())
            .collect();

        Plot::new("casual_per_working_day")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Season")
            .y_axis_label("Casual riders per working day")
            .x_axis_formatter(move |mark, _range| category_tick(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = workloads
                    .iter()
                    .enumerate()
                    .filter_map(|(i, w)| {
                        let ratio = w.casual_per_working_day?;
                        Some(
                            Bar::new(i as f64, ratio)
                                .width(0.6)
                                .fill(SEASON_COLORS[i % SEASON_COLORS.len()]),
                        )
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));

                for (i, w) in workloads.iter().enumerate() {
                    if let Some(ratio) = w.casual_per_working_day {
                        plot_ui.text(Text::new(
                            PlotPoint::new(i as f64, ratio),
                            format!("{:.2}", ratio),
                        ));
                    }
                }
            });
    }

    /// Registered riders for the two compared weather situations.
    pub fn draw_weather_chart(ui: &mut egui::Ui, comparison: &WeatherComparison) {
        let x_labels: Vec<String> = comparison
            .totals
            .iter()
            .map(|(w, _)| w.label().unwrap_or("-").to_string())
            .collect();

        Plot::new("registered_by_weather")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Weather")
            .y_axis_label("Registered riders")
            .x_axis_formatter(move |mark, _range| category_tick(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = comparison
                    .totals
                    .iter()
                    .enumerate()
                    .map(|(i, (_, total))| {
                        Bar::new(i as f64, *total as f64)
                            .width(0.6)
                            .fill(SEASON_COLORS[(i * 3) % SEASON_COLORS.len()])
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));

                for (i, (_, total)) in comparison.totals.iter().enumerate() {
                    plot_ui.text(Text::new(
                        PlotPoint::new(i as f64, *total as f64),
                        total.to_string(),
                    ));
                }
            });
    }
}

/// Tick label for integer positions, empty elsewhere.
fn category_tick(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Dates are plotted as days since the Common Era.
fn day_number(date: NaiveDate) -> f64 {
    chrono::Datelike::num_days_from_ce(&date) as f64
}

fn date_from_day_number(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tick() {
        let labels = vec!["Spring".to_string(), "Summer".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "Spring");
        assert_eq!(category_tick(&labels, 1.0), "Summer");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }

    #[test]
    fn test_day_number_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        assert_eq!(date_from_day_number(day_number(date)), Some(date));
        assert_eq!(date_from_day_number(f64::NAN), None);
    }
}
