use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard body ----
        egui::CentralPanel::default().show(ctx, |ui| {
            // A blocking load error replaces the whole body.
            if let Some(err) = &self.state.load_error {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading(RichText::new(err).color(Color32::RED));
                });
                return;
            }
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a CSV file to explore employee data  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                metrics_row(ui, &self.state);
                ui.separator();
                charts::chart_section(ui, &mut self.state);
                charts::correlation_section(ui, &mut self.state);
                table::employee_table(ui, &mut self.state);
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let m = &view.metrics;

    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Total Employees", m.total_count.to_string());
        ui.add_space(32.0);
        // The headline average reflects the rows currently shown.
        metric(ui, "Average Salary", format_currency(m.filtered_mean_salary));
        ui.add_space(32.0);
        metric(ui, "Matching", m.filtered_count.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.strong(RichText::new(value).size(22.0));
    });
}

/// `$71,234.50`-style formatting; an empty view shows a dash.
fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "—".to_string();
    }
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(71234.5), "$71,234.50");
        assert_eq!(format_currency(999.0), "$999.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-1500.25), "-$1,500.25");
        assert_eq!(format_currency(f64::NAN), "—");
    }
}
