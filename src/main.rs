mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::PhdTrendsApp;
use config::DashboardConfig;
use data::cache::DataStore;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env()?;

    // All three tables are required; a missing or malformed sheet stops here.
    let store = DataStore::new(&config);
    let tables = store.tables().context("loading survey tables")?;

    let header_image = config.header_image.filter(|path| {
        let exists = path.is_file();
        if !exists {
            log::warn!("Header image {} not found, skipping", path.display());
        }
        exists
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PhD Trends – Doctorate Recipients in the US",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the jpg banner.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PhdTrendsApp::new(AppState::new(tables, header_image))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
