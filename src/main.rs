mod app;
mod data;
mod export;
mod selection;
mod state;
mod ui;
mod view;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use app::WorldStatsApp;
use eframe::egui;
use state::AppState;

/// Data file used when no path is given on the command line.
const DEFAULT_DATA_PATH: &str = "data/indicators.csv";

fn main() -> Result<()> {
    env_logger::init();

    // The dataset is a required, static precondition: a failed load aborts
    // startup with the error message.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let dataset = data::loader::load_file(Path::new(&path))
        .with_context(|| format!("loading dataset from {path}"))?;
    log::info!(
        "loaded {} records, {} indicators, {} countries, years {}–{}",
        dataset.len(),
        dataset.indicators.len(),
        dataset.countries.len(),
        dataset.year_bounds.0,
        dataset.year_bounds.1
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset);
    eframe::run_native(
        "World Statistics",
        options,
        Box::new(|_cc| Ok(Box::new(WorldStatsApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
