//! MCH Dashboard - Maternal & Child Health Outcomes Analysis
//!
//! Loads a pre-cleaned survey extract and shows eleven filterable charts.

mod charts;
mod config;
mod dashboard;
mod data;
mod export;
mod gui;
mod stats;

use anyhow::Context;
use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().context("Failed to load dashboard configuration")?;
    log::info!("Dataset: {}", config.data_path.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Maternal & Child Health Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MCH Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config.clone())))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
