mod analysis;
mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::IpoDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default();
    log::info!("Starting with data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Indian IPO Analysis Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(IpoDashboardApp::new(config)))),
    )
}
