use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::chart::chart_metrics;
use crate::data::view::{DashboardView, NO_DATA_MESSAGE};
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LuxBenchApp {
    pub state: AppState,
}

impl LuxBenchApp {
    /// Build the app and fetch the results sheet. Blocks until the fetch ends.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.reload();
        Self { state }
    }
}

impl eframe::App for LuxBenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Derived fresh every frame from the current controls.
        let view = self.state.view();
        let visible = match &view {
            Some(Ok(v)) => Some(v.row_count()),
            _ => None,
        };

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, visible);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + chart ----
        let scale = self.state.config.score_scale;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("LuxBench: LLM results on the Luxembourgish proficiency test");
            ui.separator();
            match view {
                None => {
                    ui.centered_and_justified(|ui: &mut Ui| {
                        ui.label("No results loaded  (File → Reload or File → Open CSV…)");
                    });
                }
                Some(Err(e)) => {
                    ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                }
                Some(Ok(DashboardView::NoData)) => {
                    ui.label(NO_DATA_MESSAGE);
                }
                Some(Ok(DashboardView::Results {
                    table: filtered,
                    highlights,
                    series,
                })) => {
                    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                        table::results_table(ui, &filtered, &highlights, scale);
                        if !series.is_empty() {
                            ui.add_space(12.0);
                            ui.heading("Performance Visualization");
                            plot::performance_chart(ui, &series, &chart_metrics(&filtered));
                        }
                    });
                }
            }
        });
    }
}
