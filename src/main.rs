mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::StressFactorsApp;
use config::ReportConfig;
use eframe::egui;
use pipeline::Report;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::default();
    let report = pipeline::run(&config)?;
    println!("Wrote {}", report.output_path.display());

    if config.open_viewer {
        // The artifact is already on disk; a missing display is not fatal.
        if let Err(e) = show(&config, report) {
            log::warn!("Interactive viewer unavailable: {e:#}");
        }
    }
    Ok(())
}

fn show(config: &ReportConfig, report: Report) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::from_report(config, report);
    eframe::run_native(
        "Factors Affecting Student Stress",
        options,
        Box::new(move |_cc| Ok(Box::new(StressFactorsApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
