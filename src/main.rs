mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::LaunchDashApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded once at startup. Regenerate with
/// `cargo run --bin generate_sample`.
const DATA_FILE: &str = "data/spacex_launch_dash.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let dataset = match data::loader::load_file(Path::new(DATA_FILE)) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load {DATA_FILE}: {e:#}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} launch records across {} sites",
        dataset.len(),
        dataset.sites.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(AppState::new(dataset))))),
    )
}
