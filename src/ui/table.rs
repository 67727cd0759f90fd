use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::rank_color;
use crate::data::highlight::HighlightMap;
use crate::data::model::{CellValue, ResultTable, SIZE_COLUMN};
use crate::data::selection::ScoreScale;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered table, painting top-3 cells in shades of green.
pub fn results_table(ui: &mut Ui, table: &ResultTable, highlights: &HighlightMap, scale: ScoreScale) {
    let columns = table.columns();

    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(TableColumn::auto().at_least(48.0), columns.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(360.0)
            .header(22.0, |mut header| {
                for column in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&column.name);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, table.len(), |mut row| {
                    let r = row.index();
                    for (c, column) in columns.iter().enumerate() {
                        let text = format_cell(table.cell(r, c), column.name == SIZE_COLUMN, scale);
                        row.col(|ui: &mut Ui| match highlights.rank(r, c) {
                            Some(rank) => {
                                ui.painter().rect_filled(ui.max_rect(), 0.0, rank_color(rank));
                                ui.label(RichText::new(text).color(Color32::BLACK))
                                    .on_hover_text(format!("#{} in {}", rank.number(), column.name));
                            }
                            None => {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}

/// Scores get a fixed number of decimals for the scale; `Size` is shown as-is.
pub fn format_cell(value: &CellValue, is_size: bool, scale: ScoreScale) -> String {
    match value {
        CellValue::Float(v) if !is_size => match scale {
            ScoreScale::Fraction => format!("{v:.3}"),
            ScoreScale::Percent => format!("{v:.2}"),
        },
        CellValue::Float(v) => format!("{v}"),
        other => other.to_string(),
    }
}
