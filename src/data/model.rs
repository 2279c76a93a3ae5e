use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// SurveyError – domain errors raised while building tables and selections
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SurveyError {
    /// A metric name that is not one of the four known columns.
    #[error("unknown metric: {0:?}")]
    UnknownMetric(String),

    /// A data row carries fewer than the six fixed columns.
    #[error("row {row}: expected 6 columns, found {found}")]
    MissingColumns { row: usize, found: usize },

    /// A metric cell that is neither empty nor a number.
    #[error("row {row}, column {column}: {value:?} is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Question identifiers are the row key and must be unique.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),
}

// ---------------------------------------------------------------------------
// Metric – the four fixed percentage columns
// ---------------------------------------------------------------------------

/// One of the four percentage columns.
///
/// Variant order is the canonical metric order: it drives chart series
/// order, colour assignment, statistics columns and correlation axes.
/// `Ord` is derived so a `BTreeSet<Metric>` always iterates in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    Overall,
    Hematologic,
    Solid,
    Brain,
}

impl Metric {
    /// All metrics in canonical order.
    pub const ALL: [Metric; 4] = [
        Metric::Overall,
        Metric::Hematologic,
        Metric::Solid,
        Metric::Brain,
    ];

    /// Column label as it appears in the survey export and the UI.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Overall => "全体 (%)",
            Metric::Hematologic => "造血器腫瘍 (%)",
            Metric::Solid => "固形腫瘍 (脳腫瘍を除く) (%)",
            Metric::Brain => "脳腫瘍 (%)",
        }
    }

    /// Position in the canonical order, also the index into `SurveyRow::values`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| SurveyError::UnknownMetric(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SurveyRow – one question of the survey
// ---------------------------------------------------------------------------

/// Header of the question-id column.
pub const ID_COLUMN: &str = "問番号";
/// Header of the summary column.
pub const SUMMARY_COLUMN: &str = "設問内容の要約";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRow {
    /// Question identifier, e.g. `"Q1"`.
    pub id: String,
    /// Free-text summary of the question.
    pub summary: String,
    /// Metric values indexed by [`Metric::index`]. Missing cells are NaN.
    pub values: [f64; 4],
}

impl SurveyRow {
    pub fn value(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }

    /// `"<id> — <summary>"`, used for selection widgets only.
    pub fn display_label(&self) -> String {
        format!("{} — {}", self.id, self.summary)
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded survey
// ---------------------------------------------------------------------------

/// The full survey, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurveyTable {
    rows: Vec<SurveyRow>,
}

impl SurveyTable {
    /// Build a table, rejecting duplicate question ids.
    pub fn from_rows(rows: Vec<SurveyRow>) -> Result<Self, SurveyError> {
        let mut seen = BTreeSet::new();
        for row in &rows {
            if !seen.insert(row.id.as_str()) {
                return Err(SurveyError::DuplicateQuestion(row.id.clone()));
            }
        }
        Ok(SurveyTable { rows })
    }

    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    /// Question ids in table order.
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
