mod app;
mod color;
mod data;
mod settings;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::SurveyDashboardApp;
use clap::Parser;
use eframe::egui;
use settings::Settings;
use state::{AppState, TextSection};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    let state = match build_state(&settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {e:#}");
            return Err(e);
        }
    };

    if settings.dump_json {
        let json = serde_json::to_string_pretty(&state.view).context("serialising view")?;
        println!("{json}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&settings.title)
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let font = settings.font.clone();
    eframe::run_native(
        &settings.title,
        options,
        Box::new(move |cc| {
            ui::fonts::install_cjk_font(&cc.egui_ctx, font.as_deref());
            Ok(Box::new(SurveyDashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running window: {e}"))
}

/// Load every input file and derive the initial view.
fn build_state(settings: &Settings) -> Result<AppState> {
    let selection = settings.initial_selection().context("parsing --metrics")?;

    let table = data::loader::load_survey(&settings.data)?;
    log::info!(
        "Loaded {} questions from {}",
        table.len(),
        settings.data.display()
    );
    if table.is_empty() {
        log::warn!("{} contains no data rows", settings.data.display());
    }

    let sections = vec![
        TextSection {
            title: "調査の概要".to_string(),
            body: data::loader::load_text(&settings.overview)?,
        },
        TextSection {
            title: "補足・注記".to_string(),
            body: data::loader::load_text(&settings.notes)?,
        },
    ];

    Ok(AppState::new(
        settings.title.clone(),
        Arc::new(table),
        selection,
        sections,
    ))
}
