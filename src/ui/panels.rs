use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::car_label;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – per-car values
// ---------------------------------------------------------------------------

/// Render the left panel listing every car's six values.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Cars");
    ui.separator();

    let results = match &state.results {
        Some(rs) => rs,
        None => {
            ui.label("No batch loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, (expected, actual)) in results.cars().enumerate() {
                egui::CollapsingHeader::new(
                    RichText::new(car_label(i)).strong().color(state.car_color(i)),
                )
                .id_salt(i)
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    egui::Grid::new(("car_values", i))
                        .striped(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.label("");
                            ui.strong("Expected");
                            ui.strong("Actual");
                            ui.end_row();

                            for (name, e, a) in [
                                ("X (m)", expected.horizontal, actual.horizontal),
                                ("Y (m)", expected.vertical, actual.vertical),
                                ("Distance (m)", expected.distance, actual.distance),
                            ] {
                                ui.label(name);
                                ui.label(format!("{e:.2}"));
                                ui.label(format!("{a:.2}"));
                                ui.end_row();
                            }
                        });
                });
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
            if ui.button("Open manifest…").clicked() {
                open_manifest_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.results.is_some() {
            ui.label(format!("{} cars compared", state.car_count()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_manifest_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open batch manifest")
        .add_filter("Manifest", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_manifest(&path);
    }
}
