//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::DashboardConfig;
use crate::dashboard::{load_dataset, recompute};
use crate::data::{DataLoader, NormalizeOptions, NormalizedTable};
use crate::export::SummaryExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(NormalizedTable),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    table: Option<NormalizedTable>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        if let Some(logo_path) = &config.logo_path {
            control_panel.load_logo(&cc.egui_ctx, logo_path);
        }

        let mut app = Self {
            config,
            table: None,
            control_panel,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
        };
        app.start_loading(app.config.data_path.clone());
        app
    }

    /// Load and normalize the dataset on a background thread.
    fn start_loading(&mut self, path: PathBuf) {
        if self.control_panel.is_loading {
            return; // Already loading
        }

        self.table = None;
        self.chart_viewer.clear();
        self.control_panel.clear_dataset();
        self.control_panel.data_path = Some(path.clone());
        self.control_panel.is_loading = true;
        self.control_panel.set_status("Loading dataset...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let options = NormalizeOptions::from_config(&self.config);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {}...",
                path.display()
            )));

            let mut loader = DataLoader::new();
            match load_dataset(&mut loader, &path, &options) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete(table));
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete(table) => {
                        self.control_panel.is_loading = false;
                        should_keep_receiver = false;
                        match self.control_panel.set_dataset(&table) {
                            Ok(()) => {
                                self.control_panel
                                    .set_status(&format!("Loaded {} records", table.height()));
                                self.table = Some(table);
                                self.refresh();
                            }
                            Err(e) => {
                                self.control_panel.set_status(&format!("Error: {}", e));
                            }
                        }
                    }
                    LoadResult::Error(error) => {
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.control_panel.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute the filtered table and every chart for the current selection.
    fn refresh(&mut self) {
        let (Some(table), Some(params)) = (&self.table, &self.control_panel.params) else {
            return;
        };

        match recompute(table, params) {
            Ok(view) => {
                let status = format!("Showing {} of {} records", view.filtered.height(), table.height());
                self.chart_viewer.set_view(view, table.height());
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                log::error!("Recompute failed: {}", e);
                self.chart_viewer.clear();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle summary export - write the current aggregates as JSON
    fn handle_export_summary(&mut self) {
        let Some(view) = self.chart_viewer.view() else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("mch_summary.json")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let status = match SummaryExporter::write_summary(&output_path, &view.params, &view.aggregates) {
            Ok(()) => format!("Summary exported to {}", output_path.display()),
            Err(e) => {
                log::error!("{}", e);
                format!("Error: {}", e)
            }
        };
        self.control_panel.set_status(&status);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.control_panel.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FiltersChanged => self.refresh(),
                        ControlPanelAction::ExportSummary => self.handle_export_summary(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(
                ui,
                self.control_panel.show_raw_data,
                self.config.raw_preview_rows,
            );
        });
    }
}
