//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot.

use crate::stats::{CategoryShare, Distribution, PairSeries, MONTH_LABELS};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};
use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Color palette for groups
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(78, 121, 167),  // Blue
    Color32::from_rgb(242, 142, 43),  // Orange
    Color32::from_rgb(225, 87, 89),   // Red
    Color32::from_rgb(118, 183, 178), // Teal
    Color32::from_rgb(89, 161, 79),   // Green
    Color32::from_rgb(237, 201, 72),  // Yellow
    Color32::from_rgb(176, 122, 161), // Purple
    Color32::from_rgb(255, 157, 167), // Pink
    Color32::from_rgb(156, 117, 95),  // Brown
    Color32::from_rgb(186, 176, 172), // Grey
];

pub const CHART_HEIGHT: f32 = 280.0;

/// Creates the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// One box per distribution, outliers drawn as points.
    /// X-axis: distribution labels, Y-axis: values
    pub fn draw_box_plots(ui: &mut egui::Ui, id: &str, distributions: &[Distribution], y_label: &str) {
        let x_labels: Vec<String> = distributions.iter().map(|d| d.label.clone()).collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("")
            .y_axis_label(y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < x_labels.len() {
                    x_labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, distribution) in distributions.iter().enumerate() {
                    let Some(summary) = &distribution.summary else {
                        continue;
                    };
                    let color = Self::color(i);
                    let x = i as f64;

                    let box_elem = BoxElem::new(
                        x,
                        BoxSpread::new(
                            summary.whisker_low,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            summary.whisker_high,
                        ),
                    )
                    .name(&distribution.label)
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(&distribution.label));

                    let outliers: PlotPoints = summary
                        .outliers(&distribution.values)
                        .map(|y| [x, y])
                        .collect();
                    plot_ui.points(Points::new(outliers).radius(3.0).color(color));
                }
            });
    }

    /// Scatter of `(x, y)` pairs, one colored series per group.
    pub fn draw_scatter(ui: &mut egui::Ui, id: &str, series: &[PairSeries], x_label: &str, y_label: &str) {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::new(s.points.clone()))
                            .radius(4.0)
                            .color(Self::color(i))
                            .name(&s.group),
                    );
                }
            });
    }

    /// Bars at each x value with the summed y, groups side by side.
    pub fn draw_grouped_bars(ui: &mut egui::Ui, id: &str, series: &[PairSeries], x_label: &str, y_label: &str) {
        let group_count = series.len().max(1) as f64;
        let bar_width = 0.8 / group_count;

        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    let mut stacked: BTreeMap<i64, (f64, f64)> = BTreeMap::new();
                    for &[x, y] in &s.points {
                        let entry = stacked.entry((x * 1000.0).round() as i64).or_insert((x, 0.0));
                        entry.1 += y;
                    }

                    let offset = (i as f64 - (group_count - 1.0) / 2.0) * bar_width;
                    let color = Self::color(i);
                    let bars: Vec<Bar> = stacked
                        .values()
                        .map(|&(x, total)| Bar::new(x + offset, total).width(bar_width).fill(color))
                        .collect();

                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(&s.group));
                }
            });
    }

    /// One colored bar per category.
    pub fn draw_category_bars(ui: &mut egui::Ui, id: &str, totals: &[(String, f64)], y_label: &str) {
        let x_labels: Vec<String> = totals.iter().map(|(label, _)| label.clone()).collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("")
            .y_axis_label(y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < x_labels.len() {
                    x_labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, (label, total)) in totals.iter().enumerate() {
                    let color = Self::color(i);
                    let bar = Bar::new(i as f64, *total).width(0.6).fill(color).name(label);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(label));
                }
            });
    }

    /// Line through `(x, y)` points with markers.
    pub fn draw_trend(
        ui: &mut egui::Ui,
        id: &str,
        points: Vec<[f64; 2]>,
        x_label: &str,
        y_label: &str,
        color: Color32,
        monthly: bool,
    ) {
        let plot = Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0);
        let plot = if monthly {
            plot.include_x(1.0).include_x(12.0).x_axis_formatter(|mark, _range| {
                let month = mark.value.round();
                if (mark.value - month).abs() < 1e-6 && (1.0..=12.0).contains(&month) {
                    MONTH_LABELS[month as usize - 1].to_string()
                } else {
                    String::new()
                }
            })
        } else {
            plot.x_axis_formatter(|mark, _range| {
                if mark.value.fract().abs() < 1e-6 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
        };

        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(points.clone()))
                    .color(color)
                    .width(2.0)
                    .name(y_label),
            );
            plot_ui.points(Points::new(PlotPoints::new(points)).radius(3.0).color(color));
        });
    }

    /// Pie of category shares drawn with the painter, legend underneath.
    pub fn draw_pie(ui: &mut egui::Ui, shares: &[CategoryShare]) {
        let width = ui.available_width().min(CHART_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT - 40.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;

        let mut start = -FRAC_PI_2;
        for (i, share) in shares.iter().enumerate() {
            let sweep = share.share as f32 * TAU;
            if sweep <= 0.0 {
                continue;
            }
            let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as usize;
            let color = Self::color(i);

            for k in 0..steps {
                let a0 = start + sweep * k as f32 / steps as f32;
                let a1 = start + sweep * (k + 1) as f32 / steps as f32;
                let triangle = vec![
                    center,
                    center + radius * egui::vec2(a0.cos(), a0.sin()),
                    center + radius * egui::vec2(a1.cos(), a1.sin()),
                ];
                painter.add(egui::Shape::convex_polygon(triangle, color, Stroke::NONE));
            }
            start += sweep;
        }

        ui.horizontal_wrapped(|ui| {
            for (i, share) in shares.iter().enumerate() {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 3.0, Self::color(i));
                ui.label(
                    RichText::new(format!(
                        "{}: {:.1}% ({:.0})",
                        share.category,
                        share.share * 100.0,
                        share.total
                    ))
                    .size(12.0),
                );
                ui.add_space(10.0);
            }
        });
    }
}
