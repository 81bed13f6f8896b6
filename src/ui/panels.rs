use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use trace_panda::Dimension;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.traces.is_empty() {
        ui.label("No traces loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let unique = state.unique.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.color_dimension;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.map(Dimension::name).unwrap_or_default())
                .show_ui(ui, |ui: &mut Ui| {
                    for dim in Dimension::ALL {
                        if ui.selectable_label(current == Some(dim), dim.name()).clicked() {
                            state.set_color_dimension(dim);
                        }
                    }
                });
            if let Some(cm) = &state.color_map {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for (label, color) in cm.legend_entries() {
                        ui.colored_label(color, label);
                    }
                });
            }
            ui.separator();

            // ---- Per-dimension filter widgets (collapsible) ----
            for dim in Dimension::ALL {
                let Some(all_values) = unique.get(&dim) else {
                    continue;
                };

                let n_selected = state.selection.get(&dim).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{dim}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.name())
                    .default_open(dim == Dimension::Modem)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .selection
                                .get(&dim)
                                .is_some_and(|s| s.contains(val));

                            // Show colour swatch if this is the colour dimension
                            let mut text = RichText::new(val);
                            if state.color_dimension == Some(dim) {
                                if let Some(cm) = &state.color_map {
                                    text = text.color(cm.color_for(val));
                                }
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_value(dim, val);
                            }
                        }
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
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} traces loaded, {} visible",
            state.loader.root().display(),
            state.traces.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open trace folder")
        .set_directory(state.loader.root())
        .pick_folder();

    if let Some(root) = folder {
        state.rescan(&root);
    }
}
