//! Control Panel Widget
//! Left side panel with the date range inputs and display toggles.

use crate::data::{parse_date, DateRange};
use egui::{Color32, RichText};

/// Left side control panel with date inputs.
pub struct ControlPanel {
    /// Full extent of the data, used for defaults and reset.
    bounds: DateRange,
    /// Range currently applied to the dashboard.
    pub range: DateRange,
    pub start_text: String,
    pub end_text: String,
    pub show_raw: bool,
    pub input_error: Option<String>,
    pub status: String,
}

impl ControlPanel {
    pub fn new(bounds: DateRange) -> Self {
        Self {
            bounds,
            range: bounds,
            start_text: bounds.start.to_string(),
            end_text: bounds.end.to_string(),
            show_raw: false,
            input_error: None,
            status: "Ready".to_string(),
        }
    }

    /// Parse both inputs. On error the applied range is kept.
    pub fn parse_inputs(&mut self) -> Option<DateRange> {
        let start = parse_date(&self.start_text);
        let end = parse_date(&self.end_text);

        match (start, end) {
            (Some(start), Some(end)) => {
                self.input_error = None;
                Some(DateRange::new(start, end))
            }
            (None, _) => {
                self.input_error = Some(format!("Invalid start date '{}'", self.start_text));
                None
            }
            (_, None) => {
                self.input_error = Some(format!("Invalid end date '{}'", self.end_text));
                None
            }
        }
    }

    fn reset(&mut self) {
        self.start_text = self.bounds.start.to_string();
        self.end_text = self.bounds.end.to_string();
        self.input_error = None;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Sharing")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Usage Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 80.0;
        let mut edited = false;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Start Date:"));
            let response = ui.text_edit_singleline(&mut self.start_text);
            edited |= response.lost_focus();
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("End Date:"));
            let response = ui.text_edit_singleline(&mut self.end_text);
            edited |= response.lost_focus();
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                edited = true;
            }
            if ui.button("Full range").clicked() {
                self.reset();
                edited = true;
            }
        });

        if edited {
            if let Some(range) = self.parse_inputs() {
                if range != self.range {
                    action = ControlPanelAction::RangeChanged(range);
                }
            }
        }

        if let Some(error) = &self.input_error {
            ui.label(
                RichText::new(error)
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Display Section =====
        ui.label(RichText::new("⚙️ Display").size(14.0).strong());
        ui.add_space(5.0);
        ui.checkbox(&mut self.show_raw, "Show raw data");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RangeChanged(DateRange),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bounds() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2012, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_defaults_to_full_range() {
        let panel = ControlPanel::new(bounds());
        assert_eq!(panel.range, bounds());
        assert_eq!(panel.start_text, "2011-01-01");
        assert_eq!(panel.end_text, "2012-12-31");
    }

    #[test]
    fn test_parse_inputs() {
        let mut panel = ControlPanel::new(bounds());
        panel.start_text = "2011-05-01".to_string();
        let range = panel.parse_inputs().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2011, 5, 1).unwrap());

        panel.end_text = "31/12/2012".to_string();
        assert!(panel.parse_inputs().is_none());
        assert!(panel.input_error.as_deref().unwrap().contains("end date"));
    }
}
