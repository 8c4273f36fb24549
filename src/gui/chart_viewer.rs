//! Chart Viewer Widget
//! Central scrollable panel with the eleven chart cards and the raw data preview.
//! Supports responsive multi-column layout based on available width.

use crate::charts::ChartPlotter;
use crate::dashboard::DashboardView;
use egui::{Color32, RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CHART_WIDTH: f32 = 620.0; // Fixed width for each chart card

/// The dashboard charts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PregnancyDistribution,
    LivebirthsVsStillbirths,
    TwinOutcomesByGender,
    OutcomeTotals,
    AliveBoysVsGirls,
    MultipleBirths,
    PregnanciesByEducation,
    LivebirthsByWorkRegime,
    LivebirthsByIdCard,
    PregnanciesByYear,
    PregnanciesByMonth,
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        ChartKind::PregnancyDistribution,
        ChartKind::LivebirthsVsStillbirths,
        ChartKind::TwinOutcomesByGender,
        ChartKind::OutcomeTotals,
        ChartKind::AliveBoysVsGirls,
        ChartKind::MultipleBirths,
        ChartKind::PregnanciesByEducation,
        ChartKind::LivebirthsByWorkRegime,
        ChartKind::LivebirthsByIdCard,
        ChartKind::PregnanciesByYear,
        ChartKind::PregnanciesByMonth,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::PregnancyDistribution => "Distribution of Number of Pregnancies per Mother",
            ChartKind::LivebirthsVsStillbirths => "Live Births vs. Stillbirths (By Previous Pregnancies)",
            ChartKind::TwinOutcomesByGender => "Twin Outcomes Distribution by Gender",
            ChartKind::OutcomeTotals => "Distribution of Pregnancy Outcomes",
            ChartKind::AliveBoysVsGirls => "Total Live Births: Boys vs. Girls",
            ChartKind::MultipleBirths => "Distribution of Multiple Birth Outcomes",
            ChartKind::PregnanciesByEducation => "Fertility vs. Education Status",
            ChartKind::LivebirthsByWorkRegime => "Work Regime and Live Birth Outcomes",
            ChartKind::LivebirthsByIdCard => "Impact of ID Documentation on Birth Registrations",
            ChartKind::PregnanciesByYear => "Total Pregnancies Trend Over Years",
            ChartKind::PregnanciesByMonth => "Total Pregnancies Trend Over Months",
        }
    }

    pub fn title_color(self) -> Color32 {
        match self {
            ChartKind::PregnancyDistribution
            | ChartKind::PregnanciesByYear
            | ChartKind::PregnanciesByMonth => Color32::from_rgb(78, 121, 167),
            ChartKind::LivebirthsVsStillbirths => Color32::from_rgb(242, 142, 43),
            ChartKind::TwinOutcomesByGender | ChartKind::MultipleBirths => {
                Color32::from_rgb(225, 87, 89)
            }
            ChartKind::OutcomeTotals => Color32::from_rgb(118, 183, 178),
            ChartKind::AliveBoysVsGirls => Color32::from_rgb(89, 161, 79),
            ChartKind::PregnanciesByEducation => Color32::from_rgb(255, 127, 14),
            ChartKind::LivebirthsByWorkRegime => Color32::from_rgb(148, 103, 189),
            ChartKind::LivebirthsByIdCard => Color32::from_rgb(188, 189, 34),
        }
    }

    fn id(self) -> String {
        format!("chart_{:?}", self)
    }
}

/// Scrollable chart display area with responsive multi-column layout.
pub struct ChartViewer {
    view: Option<DashboardView>,
    total_records: usize,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            view: None,
            total_records: 0,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
        self.total_records = 0;
    }

    pub fn set_view(&mut self, view: DashboardView, total_records: usize) {
        self.view = Some(view);
        self.total_records = total_records;
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Draw the chart viewer; charts wrap into as many columns as fit.
    pub fn show(&self, ui: &mut egui::Ui, show_raw_data: bool, preview_rows: usize) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Maternal & Child Health Outcomes Analysis")
                    .size(30.0)
                    .strong()
                    .color(Color32::from_rgb(78, 121, 167)),
            );
            ui.label(
                RichText::new(format!(
                    "{} of {} records match the current filters",
                    view.filtered.height(),
                    self.total_records
                ))
                .size(13.0)
                .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if view.aggregates.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(
                            RichText::new("No records match the selected filters")
                                .size(18.0)
                                .color(Color32::GRAY),
                        );
                    });
                } else {
                    Self::show_chart_grid(ui, view);
                }

                if show_raw_data {
                    ui.add_space(CHART_SPACING);
                    ui.separator();
                    ui.label(RichText::new("Raw Data").size(18.0).strong());
                    ui.add_space(5.0);
                    super::data_table::show(ui, view.filtered.dataframe(), preview_rows);
                }
            });
    }

    fn show_chart_grid(ui: &mut egui::Ui, view: &DashboardView) {
        // Calculate how many columns fit in available width
        let avail_width = ui.available_width();
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);

        for row in ChartKind::ALL.chunks(num_columns) {
            ui.horizontal(|ui| {
                for &kind in row {
                    Self::draw_chart_card(ui, view, kind);
                    ui.add_space(CHART_SPACING);
                }
            });
            ui.add_space(CHART_SPACING);
        }
    }

    /// Draw a single chart card with fixed width
    fn draw_chart_card(ui: &mut egui::Ui, view: &DashboardView, kind: ChartKind) {
        let card_width = CHART_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(kind.title())
                            .size(17.0)
                            .strong()
                            .color(kind.title_color()),
                    );
                    ui.add_space(8.0);
                    Self::draw_chart(ui, view, kind);
                });
            });
    }

    fn draw_chart(ui: &mut egui::Ui, view: &DashboardView, kind: ChartKind) {
        let aggregates = &view.aggregates;
        let id = kind.id();

        match kind {
            ChartKind::PregnancyDistribution => ChartPlotter::draw_box_plots(
                ui,
                &id,
                std::slice::from_ref(&aggregates.pregnancies),
                "Number of Pregnancies",
            ),
            ChartKind::LivebirthsVsStillbirths => ChartPlotter::draw_scatter(
                ui,
                &id,
                &aggregates.livebirths_vs_stillbirths,
                "Live Births",
                "Stillbirths",
            ),
            ChartKind::TwinOutcomesByGender => ChartPlotter::draw_box_plots(
                ui,
                &id,
                &aggregates.twin_outcomes_by_gender,
                "Number of Twin Outcomes",
            ),
            ChartKind::OutcomeTotals => {
                let totals: Vec<(String, f64)> = aggregates
                    .outcome_totals
                    .entries()
                    .iter()
                    .map(|&(label, total)| (label.to_string(), total))
                    .collect();
                ChartPlotter::draw_category_bars(ui, &id, &totals, "Total Count");
            }
            ChartKind::AliveBoysVsGirls => ChartPlotter::draw_grouped_bars(
                ui,
                &id,
                &aggregates.alive_boys_vs_girls,
                "Boys",
                "Girls",
            ),
            ChartKind::MultipleBirths => {
                ChartPlotter::draw_box_plots(ui, &id, &aggregates.multiple_births, "Count")
            }
            ChartKind::PregnanciesByEducation => ChartPlotter::draw_box_plots(
                ui,
                &id,
                &aggregates.pregnancies_by_education,
                "Number of Pregnancies",
            ),
            ChartKind::LivebirthsByWorkRegime => {
                let totals: Vec<(String, f64)> = aggregates
                    .livebirths_by_work_regime
                    .iter()
                    .map(|t| (t.category.clone(), t.total))
                    .collect();
                ChartPlotter::draw_category_bars(ui, &id, &totals, "Live Births");
            }
            ChartKind::LivebirthsByIdCard => {
                ChartPlotter::draw_pie(ui, &aggregates.livebirths_by_id_card)
            }
            ChartKind::PregnanciesByYear => {
                let points = aggregates
                    .pregnancies_by_year
                    .iter()
                    .map(|y| [y.year as f64, y.total])
                    .collect();
                ChartPlotter::draw_trend(
                    ui,
                    &id,
                    points,
                    "Year",
                    "Total Pregnancies",
                    Color32::from_rgb(31, 119, 180),
                    false,
                );
            }
            ChartKind::PregnanciesByMonth => {
                let points = aggregates
                    .pregnancies_by_month
                    .iter()
                    .map(|m| [m.month as f64, m.total])
                    .collect();
                ChartPlotter::draw_trend(
                    ui,
                    &id,
                    points,
                    "Month",
                    "Total Pregnancies",
                    Color32::from_rgb(255, 127, 14),
                    true,
                );
            }
        }
    }
}
