use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::metric_color;
use crate::data::model::Metric;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the controls panel. Nothing here recomputes the view except the
/// apply button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("フィルター");
    ui.separator();

    question_selector(ui, state);
    ui.separator();

    metric_checklist(ui, state);
    ui.separator();

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui.button(RichText::new("フィルタリング").strong()).clicked() {
            state.apply();
        }
    });
    if state.is_dirty() {
        ui.label(RichText::new("未適用の変更があります").small().color(Color32::YELLOW));
    }
}

fn question_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("問番号を選択:");

    let n_selected = state.pending.questions.len();
    let summary = if n_selected == 0 {
        "未選択 (全件表示)".to_string()
    } else {
        format!("{n_selected} / {} 件選択", state.table.len())
    };
    ui.label(RichText::new(summary).small());

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("全選択").clicked() {
            state.select_all_questions();
        }
        if ui.small_button("クリア").clicked() {
            state.clear_questions();
        }
    });

    // The table is shared, so holding a handle lets us mutate `state` in the loop.
    let table = Arc::clone(&state.table);
    ScrollArea::vertical()
        .id_salt("question_list")
        .max_height(260.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for row in table.rows() {
                let mut checked = state.pending.questions.contains(&row.id);
                if ui.checkbox(&mut checked, row.display_label()).changed() {
                    state.toggle_question(&row.id);
                }
            }
        });
}

fn metric_checklist(ui: &mut Ui, state: &mut AppState) {
    ui.strong("比較する指標:");
    for metric in Metric::ALL {
        let mut checked = state.pending.metrics.contains(&metric);
        let text = RichText::new(metric.label()).color(metric_color(metric));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_metric(metric);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and a row count summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&state.title);
        ui.separator();
        ui.label(format!(
            "{} 問中 {} 問を表示",
            state.table.len(),
            state.view.rows.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Collapsible text sections
// ---------------------------------------------------------------------------

/// Render the auxiliary text files verbatim, one collapsible block each.
pub fn text_sections(ui: &mut Ui, state: &AppState) {
    for (i, section) in state.sections.iter().enumerate() {
        egui::CollapsingHeader::new(RichText::new(&section.title).strong())
            .id_salt(("text_section", i))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(&section.body).monospace());
            });
    }
}
