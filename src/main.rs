mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::LuxBenchApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::warn!("{e:#}; falling back to default settings");
        DashboardConfig::default()
    });
    log::info!("results source: {}", config.source());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LuxBench – LLM Leaderboard",
        options,
        Box::new(|_cc| Ok(Box::new(LuxBenchApp::new(config)))),
    )
}
