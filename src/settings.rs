use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::Selection;
use crate::data::model::{Metric, SurveyError};

/// Interactive dashboard for the pediatric survey results
#[derive(Parser, Debug, Clone)]
#[command(name = "survey-dashboard", version)]
pub struct Settings {
    /// Survey export (CSV, header row ignored)
    #[arg(long, default_value = "Book1.csv")]
    pub data: PathBuf,

    /// Text shown in the first collapsible section
    #[arg(long, default_value = "overview.txt")]
    pub overview: PathBuf,

    /// Text shown in the second collapsible section
    #[arg(long, default_value = "notes.txt")]
    pub notes: PathBuf,

    /// Font with Japanese glyphs (a common system font is tried otherwise)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Window and page title
    #[arg(long, default_value = "小児調査データダッシュボード")]
    pub title: String,

    /// Metrics checked at startup (column labels); defaults to the first two
    #[arg(long, num_args = 1..)]
    pub metrics: Vec<String>,

    /// Print the default view as JSON and exit instead of opening a window
    #[arg(long)]
    pub dump_json: bool,
}

impl Settings {
    /// Selection shown before the first apply: every question, and the
    /// `--metrics` labels (unknown labels are rejected).
    pub fn initial_selection(&self) -> Result<Selection, SurveyError> {
        if self.metrics.is_empty() {
            return Ok(Selection::new(Vec::<String>::new(), Metric::ALL[..2].iter().copied()));
        }
        Selection::from_names(Vec::<String>::new(), &self.metrics)
    }
}
