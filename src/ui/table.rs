use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{self, EXPORT_FILE_NAME};
use crate::data::model::COLUMNS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Employee Information section: table of the filtered rows + export
// ---------------------------------------------------------------------------

pub fn employee_table(ui: &mut Ui, state: &mut AppState) {
    let mut status: Option<String> = None;

    if let Some(view) = &state.view {
        ui.separator();
        egui::CollapsingHeader::new(RichText::new("Employee Information").strong())
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                let rows = &view.table.rows;

                TableBuilder::new(ui)
                    .striped(true)
                    .columns(Column::auto().resizable(true), COLUMNS.len())
                    .header(20.0, |mut header| {
                        for col in COLUMNS {
                            header.col(|ui| {
                                ui.strong(col);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, rows.len(), |mut row| {
                            let r = &rows[row.index()];
                            row.col(|ui| {
                                ui.label(&r.name);
                            });
                            row.col(|ui| {
                                ui.label(r.age.to_string());
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.2}", r.salary));
                            });
                            row.col(|ui| {
                                ui.label(&r.city);
                            });
                            row.col(|ui| {
                                ui.label(&r.category);
                            });
                            row.col(|ui| {
                                ui.label(&r.department);
                            });
                            row.col(|ui| {
                                ui.label(&r.date);
                            });
                        });
                    });

                ui.add_space(4.0);
                ui.label(format!("Number of results: {}", rows.len()));

                if ui.button("Download Filtered Data").clicked() {
                    status = export_dialog(&view.table);
                }
            });
    }

    if let Some(msg) = status {
        state.status_message = Some(msg);
    }
}

/// Ask for a destination and write the filtered view as CSV. Returns the
/// status line to show.
fn export_dialog(table: &crate::data::model::EmployeeTable) -> Option<String> {
    let dest = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()?;

    match export::to_csv_bytes(table).and_then(|bytes| {
        std::fs::write(&dest, bytes).map_err(anyhow::Error::from)
    }) {
        Ok(()) => {
            log::info!("Exported {} rows to {}", table.len(), dest.display());
            Some(format!("Saved {}", dest.display()))
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            Some(format!("Export failed: {e:#}"))
        }
    }
}
