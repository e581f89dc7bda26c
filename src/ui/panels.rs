use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left "Filter Options" panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            value_set_filter(
                ui,
                "Employee Categories",
                &dataset.categories,
                &mut state.criteria.categories,
                |label| {
                    state
                        .category_colors
                        .as_ref()
                        .map(|colors| colors.color_for(label))
                },
            );
            value_set_filter(
                ui,
                "Departments",
                &dataset.departments,
                &mut state.criteria.departments,
                |_| None,
            );

            ui.separator();
            ui.strong("Salary Range ($)");
            let (lo, hi) = dataset.salary_bounds;
            ui.add(
                egui::Slider::new(&mut state.criteria.salary_range.0, lo..=hi)
                    .text("Min")
                    .fixed_decimals(0),
            );
            ui.add(
                egui::Slider::new(&mut state.criteria.salary_range.1, lo..=hi)
                    .text("Max")
                    .fixed_decimals(0),
            );

            ui.separator();
            ui.strong("Search by Name or City");
            ui.text_edit_singleline(&mut state.criteria.search_term);
        });

    // Re-run the whole pass after any widget change.
    state.recompute();
}

/// One collapsible multi-select: All/None buttons plus a checkbox per
/// distinct value, optionally coloured by the category palette.
fn value_set_filter(
    ui: &mut Ui,
    title: &str,
    all_values: &BTreeSet<String>,
    selected: &mut BTreeSet<String>,
    swatch: impl Fn(&str) -> Option<Color32>,
) {
    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for value in all_values {
                let mut text = RichText::new(value);
                if let Some(color) = swatch(value) {
                    text = text.color(color);
                }
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} employees loaded, {} matching",
                ds.len(),
                view.metrics.filtered_count
            ));
        }

        for warning in &state.load_warnings {
            ui.separator();
            ui.label(RichText::new(warning).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::LIGHT_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
