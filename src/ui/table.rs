use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Metric, SurveyRow, ID_COLUMN, SUMMARY_COLUMN};
use crate::data::pipeline::StatsTable;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Filtered rows
// ---------------------------------------------------------------------------

/// Render the filtered survey rows with every original column.
pub fn data_table(ui: &mut Ui, rows: &[SurveyRow]) {
    TableBuilder::new(ui)
        .id_salt("data_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(48.0))
        .column(Column::initial(280.0).at_least(120.0).clip(true))
        .columns(Column::auto().at_least(90.0), Metric::ALL.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(280.0)
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong(ID_COLUMN);
            });
            header.col(|ui| {
                ui.strong(SUMMARY_COLUMN);
            });
            for metric in Metric::ALL {
                header.col(|ui| {
                    ui.strong(metric.label());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                table_row.col(|ui| {
                    ui.label(&row.id);
                });
                table_row.col(|ui| {
                    ui.label(&row.summary).on_hover_text(&row.summary);
                });
                for metric in Metric::ALL {
                    table_row.col(|ui| {
                        ui.label(format_raw(row.value(metric)));
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Render the rounded statistics, one column per selected metric.
pub fn stats_table(ui: &mut Ui, stats: &StatsTable) {
    if stats.is_empty() {
        let message = RichText::new("選択されたデータがありません").italics();
        ui.label(message.color(Color32::GRAY));
        return;
    }

    TableBuilder::new(ui)
        .id_salt("stats_table")
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
        .column(Column::exact(60.0))
        .columns(Column::auto().at_least(110.0), stats.columns.len())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|_| {});
            for (metric, _) in &stats.columns {
                header.col(|ui| {
                    ui.strong(metric.label());
                });
            }
        })
        .body(|mut body| {
            for (name, values) in stats.rows() {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.strong(name);
                    });
                    for value in values {
                        table_row.col(|ui| {
                            ui.monospace(format_value(value));
                        });
                    }
                });
            }
        });
}

/// The loaded value as-is, with missing values shown as `NaN`.
pub fn format_raw(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        value.to_string()
    }
}

/// One decimal place, with missing values shown as `NaN`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.1}")
    }
}
