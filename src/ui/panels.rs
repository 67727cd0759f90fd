use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::selection::{Category, Openness, KNOWN_FAMILIES, THRESHOLD_STEPS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the filter controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let levels = state.config.levels();
    let scale = state.config.score_scale;
    let size_limit = state.config.size_max;
    let controls = &mut state.controls;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Filter closed/open LLMs");
            for opt in Openness::OPTIONS {
                ui.radio_value(&mut controls.openness, opt, opt.as_str());
            }
            ui.separator();

            ui.strong("Filter CEFR level");
            ui.radio_value(&mut controls.level, None, "All");
            for &level in levels {
                ui.radio_value(&mut controls.level, Some(level), level.as_str());
            }
            ui.separator();

            ui.strong("Filter Test Category");
            ui.radio_value(&mut controls.category, None, "All");
            for cat in Category::ALL {
                ui.radio_value(&mut controls.category, Some(cat), cat.as_str());
            }
            ui.separator();

            ui.strong("Select LLM Family:");
            let current = controls.family.clone().unwrap_or_else(|| "All".to_string());
            egui::ComboBox::from_id_salt("family")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut controls.family, None, "All");
                    for family in KNOWN_FAMILIES {
                        ui.selectable_value(&mut controls.family, Some(family.to_string()), family);
                    }
                });
            ui.separator();

            ui.strong("Select size range of LLM parameters:");
            ui.add(egui::Slider::new(&mut controls.size_min, 0..=size_limit).text("min"));
            ui.add(egui::Slider::new(&mut controls.size_max, 0..=size_limit).text("max"));
            if controls.size_min > controls.size_max {
                controls.size_max = controls.size_min;
            }
            ui.separator();

            ui.strong("Show LLMs with minimum performance of:");
            ui.add(
                egui::Slider::new(&mut controls.threshold_step, 0..=THRESHOLD_STEPS)
                    .custom_formatter(move |v, _| scale.format_score(scale.threshold_at(v as u32)))
                    .custom_parser(|_| None),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, visible_rows: Option<usize>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} models loaded, {} shown",
                table.len(),
                visible_rows.unwrap_or(0)
            ));
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open leaderboard export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
