//! Raw data preview grid.

use egui::{RichText, ScrollArea};
use polars::prelude::*;

/// Show the first `max_rows` rows of `df` as a striped grid.
pub fn show(ui: &mut egui::Ui, df: &DataFrame, max_rows: usize) {
    let preview = df.head(Some(max_rows));

    ScrollArea::horizontal()
        .id_salt("raw_data_preview")
        .show(ui, |ui| {
            egui::Grid::new("raw_data_grid")
                .striped(true)
                .min_col_width(60.0)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for column in preview.get_columns() {
                        ui.label(RichText::new(column.name().as_str()).strong().size(11.0));
                    }
                    ui.end_row();

                    for row in 0..preview.height() {
                        for column in preview.get_columns() {
                            ui.label(RichText::new(cell_text(column, row)).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });

    if df.height() > max_rows {
        ui.label(
            RichText::new(format!("Showing {} of {} rows", max_rows, df.height()))
                .size(11.0)
                .color(egui::Color32::GRAY),
        );
    }
}

fn cell_text(column: &Column, row: usize) -> String {
    match column.get(row) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(value) => value.to_string().trim_matches('"').to_string(),
    }
}
