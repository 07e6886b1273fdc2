use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Cell, Table};
use crate::data::summary::{Description, Stats};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data preview
// ---------------------------------------------------------------------------

/// Render the first rows of the working table, with an index column.
pub fn preview_table(ui: &mut Ui, table: &Table, hidden_rows: usize) {
    let columns = table.columns();

    ui.push_id("preview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(320.0)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(60.0).clip(true), columns.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for col in columns {
                    header.col(|ui| {
                        ui.strong(&col.name).on_hover_text(col.kind.to_string());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.n_rows(), |mut row| {
                    let idx = row.index();
                    row.col(|ui| {
                        ui.weak(idx.to_string());
                    });
                    for col in columns {
                        row.col(|ui| {
                            cell_label(ui, &col.cells[idx]);
                        });
                    }
                });
            });
    });

    if hidden_rows > 0 {
        ui.weak(format!("… {hidden_rows} more rows not shown"));
    }
}

fn cell_label(ui: &mut Ui, cell: &Cell) {
    match cell {
        Cell::Missing => {
            ui.weak(cell.to_string());
        }
        _ => {
            ui.label(cell.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Render `describe` output: one row per statistic, one column per numeric
/// column.
pub fn stats_grid(ui: &mut Ui, description: &Description) {
    if description.is_empty() {
        ui.label("No numeric columns to describe.");
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("stats_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("stats_grid")
                .striped(true)
                .min_col_width(70.0)
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for (name, _) in description.iter() {
                        ui.strong(name);
                    }
                    ui.end_row();

                    for (row, label) in Stats::LABELS.iter().enumerate() {
                        ui.label(RichText::new(*label).strong());
                        for (_, stats) in description.iter() {
                            let value = stats.values()[row];
                            if row == 0 {
                                ui.label(format!("{value:.0}"));
                            } else {
                                ui.label(format_stat(value));
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.4}")
    }
}
