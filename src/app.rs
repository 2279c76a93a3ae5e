use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyDashboardApp {
    pub state: AppState,
}

impl SurveyDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SurveyDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: derived artifacts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("dashboard")
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let view = &self.state.view;

                    ui.heading("データテーブル");
                    table::data_table(ui, &view.rows);
                    ui.add_space(16.0);

                    ui.heading("項目比較");
                    plot::comparison_chart(ui, &view.comparison);
                    ui.add_space(16.0);

                    ui.heading("相関ヒートマップ");
                    plot::correlation_heatmap(ui, &view.correlation);
                    ui.add_space(16.0);

                    ui.heading("統計情報");
                    table::stats_table(ui, &view.stats);
                    ui.add_space(16.0);

                    panels::text_sections(ui, &self.state);
                });
        });
    }
}
