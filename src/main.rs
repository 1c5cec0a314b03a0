mod app;
mod color;
mod dashboard;
mod data;
mod error;
mod present;
mod state;
mod ui;

use std::path::PathBuf;

use app::CompanyExplorerApp;
use eframe::egui;
use state::{DATASET_PATH_ENV, DEFAULT_DATASET_PATH};

/// First CLI argument, else `COMPANY_EXPLORER_DATA`, else the default file
/// when it exists in the working directory.
fn dataset_path() -> Option<PathBuf> {
    if let Some(arg) = std::env::args_os().nth(1) {
        return Some(PathBuf::from(arg));
    }
    if let Some(var) = std::env::var_os(DATASET_PATH_ENV) {
        return Some(PathBuf::from(var));
    }
    let default = PathBuf::from(DEFAULT_DATASET_PATH);
    default.exists().then_some(default)
}

fn main() -> eframe::Result {
    env_logger::init();

    let dataset = dataset_path();
    match &dataset {
        Some(path) => log::info!("Dataset source: {}", path.display()),
        None => log::info!("No dataset found; use File → Open…"),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Company Explorer – Top 2000 Global Companies",
        options,
        Box::new(move |_cc| Ok(Box::new(CompanyExplorerApp::new(dataset.as_deref())))),
    )
}
