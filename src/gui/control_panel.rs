//! Control Panel Widget
//! Left side panel with the logo, data source and the three filters.

use crate::data::{FilterError, FilterParams, NormalizedTable};
use egui::{Color32, RichText, ScrollArea, TextureHandle};
use std::path::{Path, PathBuf};

/// Sidebar footer credit.
const AUTHOR_CREDIT: &str = "By: Nelio Lino Nhacolo";

/// Left side control panel with the sidebar filters.
pub struct ControlPanel {
    pub data_path: Option<PathBuf>,
    /// Current selection; `None` until a dataset is loaded
    pub params: Option<FilterParams>,
    pub show_raw_data: bool,
    pub status: String,
    pub is_loading: bool,
    age_bounds: (i64, i64),
    year_bounds: (i64, i64),
    genders: Vec<String>,
    logo: Option<TextureHandle>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            data_path: None,
            params: None,
            show_raw_data: false,
            status: "Ready".to_string(),
            is_loading: false,
            age_bounds: (0, 0),
            year_bounds: (0, 0),
            genders: Vec::new(),
            logo: None,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the branding image and keep it as a texture.
    pub fn load_logo(&mut self, ctx: &egui::Context, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                self.logo = Some(ctx.load_texture("logo", color_image, egui::TextureOptions::LINEAR));
            }
            Err(e) => log::warn!("Logo {} not shown: {}", path.display(), e),
        }
    }

    /// Reset the filters to the full extent of a freshly loaded table.
    pub fn set_dataset(&mut self, table: &NormalizedTable) -> Result<(), FilterError> {
        let params = FilterParams::unrestricted(table)?;
        self.age_bounds = (params.age.min, params.age.max);
        self.year_bounds = (params.year.min, params.year.max);
        self.genders = params.genders.iter().cloned().collect();
        self.params = Some(params);
        Ok(())
    }

    pub fn clear_dataset(&mut self) {
        self.params = None;
        self.genders.clear();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        if let Some(logo) = &self.logo {
            let width = ui.available_width().min(280.0);
            let aspect = logo.aspect_ratio();
            ui.vertical_centered(|ui| {
                ui.image(egui::load::SizedTexture::new(
                    logo.id(),
                    egui::vec2(width, width / aspect),
                ));
            });
            ui.add_space(5.0);
        }

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Outcomes Analysis")
                    .size(22.0)
                    .color(Color32::from_rgb(78, 121, 167)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .data_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.params.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        if let Some(params) = self.params.as_mut() {
            let before = params.clone();

            ui.label("Select Age Range:");
            range_sliders(ui, &mut params.age.min, &mut params.age.max, self.age_bounds);
            ui.add_space(8.0);

            ui.label("Select Year Range:");
            range_sliders(ui, &mut params.year.min, &mut params.year.max, self.year_bounds);
            ui.add_space(8.0);

            ui.label("Select Gender:");
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                        for gender in &self.genders {
                            let mut checked = params.genders.contains(gender);
                            if ui.checkbox(&mut checked, gender).changed() {
                                if checked {
                                    params.genders.insert(gender.clone());
                                } else {
                                    params.genders.remove(gender);
                                }
                            }
                        }
                    });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    params.genders = self.genders.iter().cloned().collect();
                }
                if ui.small_button("Clear All").clicked() {
                    params.genders.clear();
                }
            });

            if *params != before {
                action = ControlPanelAction::FiltersChanged;
            }
        } else {
            ui.label(RichText::new("Load a dataset to enable filters").color(Color32::GRAY));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Actions =====
        ui.checkbox(&mut self.show_raw_data, "Show Raw Data");
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.params.is_some(), |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Summary").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSummary;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") || self.status.starts_with("Showing") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        ui.add_space(15.0);
        egui::Frame::none()
            .fill(Color32::from_rgb(23, 45, 66))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(AUTHOR_CREDIT)
                        .size(12.0)
                        .color(Color32::from_rgb(143, 196, 255)),
                );
            });

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Min/max sliders over `bounds`, kept ordered.
fn range_sliders(ui: &mut egui::Ui, min: &mut i64, max: &mut i64, bounds: (i64, i64)) {
    let (lo, hi) = bounds;
    let min_changed = ui
        .add(egui::Slider::new(min, lo..=hi).text("from"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(max, lo..=hi).text("to"))
        .changed();

    if *min > *max {
        if min_changed {
            *max = *min;
        } else if max_changed {
            *min = *max;
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FiltersChanged,
    ExportSummary,
}
