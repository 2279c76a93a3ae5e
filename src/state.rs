use std::sync::Arc;

use crate::data::filter::Selection;
use crate::data::model::{Metric, SurveyTable};
use crate::data::pipeline::{derive_view, DashboardView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A collapsible block of free text shown under the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSection {
    pub title: String,
    pub body: String,
}

/// The full UI state, independent of rendering.
///
/// Widgets edit `pending`; the artifacts in `view` only change when
/// [`AppState::apply`] is called.
pub struct AppState {
    /// Page heading.
    pub title: String,

    /// Survey loaded at startup, shared read-only.
    pub table: Arc<SurveyTable>,

    /// Selection being edited in the controls panel.
    pub pending: Selection,

    /// Selection the current view was derived from.
    pub applied: Selection,

    /// Artifacts for the applied selection.
    pub view: DashboardView,

    /// Auxiliary text sections.
    pub sections: Vec<TextSection>,
}

impl AppState {
    /// Build the state and derive the initial view, as if "apply" had been
    /// pressed once with `initial`.
    pub fn new(
        title: String,
        table: Arc<SurveyTable>,
        initial: Selection,
        sections: Vec<TextSection>,
    ) -> Self {
        let pending = initial;
        let view = derive_view(&table, &pending);
        Self {
            title,
            table,
            applied: pending.clone(),
            pending,
            view,
            sections,
        }
    }

    /// Recompute every artifact from the pending selection.
    pub fn apply(&mut self) {
        log::debug!(
            "Applying selection: {} questions, metrics {:?}",
            self.pending.questions.len(),
            self.pending.metrics
        );
        self.view = derive_view(&self.table, &self.pending);
        self.applied = self.pending.clone();
    }

    /// Whether the controls differ from what is currently displayed.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.applied
    }

    pub fn toggle_question(&mut self, id: &str) {
        if !self.pending.questions.remove(id) {
            self.pending.questions.insert(id.to_string());
        }
    }

    pub fn toggle_metric(&mut self, metric: Metric) {
        if !self.pending.metrics.remove(&metric) {
            self.pending.metrics.insert(metric);
        }
    }

    /// Explicitly select every question id.
    pub fn select_all_questions(&mut self) {
        self.pending.questions = self.table.question_ids().map(str::to_string).collect();
    }

    /// Clear the question selection, which shows every row.
    pub fn clear_questions(&mut self) {
        self.pending.questions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SurveyRow;

    fn state() -> AppState {
        let rows = vec![
            SurveyRow {
                id: "Q1".into(),
                summary: "a".into(),
                values: [50.0, 40.0, 60.0, 30.0],
            },
            SurveyRow {
                id: "Q2".into(),
                summary: "b".into(),
                values: [70.0, 60.0, 80.0, 50.0],
            },
        ];
        let table = Arc::new(SurveyTable::from_rows(rows).unwrap());
        let initial = Selection::new(Vec::<String>::new(), Metric::ALL[..2].iter().copied());
        AppState::new("t".into(), table, initial, Vec::new())
    }

    #[test]
    fn initial_view_uses_default_selection() {
        let s = state();
        assert_eq!(s.view.rows.len(), 2);
        assert_eq!(s.view.stats.columns.len(), 2);
        assert!(!s.is_dirty());
    }

    #[test]
    fn pending_changes_wait_for_apply() {
        let mut s = state();
        s.toggle_question("Q2");
        s.toggle_metric(Metric::Hematologic);
        assert!(s.is_dirty());
        assert_eq!(s.view.rows.len(), 2);
        assert_eq!(s.view.stats.columns.len(), 2);

        s.apply();
        assert!(!s.is_dirty());
        assert_eq!(s.view.rows.len(), 1);
        assert_eq!(s.view.rows[0].id, "Q2");
        assert_eq!(s.view.stats.columns.len(), 1);
    }

    #[test]
    fn unchecking_all_metrics_shows_placeholders() {
        let mut s = state();
        s.toggle_metric(Metric::Overall);
        s.toggle_metric(Metric::Hematologic);
        s.apply();
        assert!(s.view.comparison.is_nothing_selected());
        assert!(s.view.correlation.is_nothing_selected());
        assert!(s.view.stats.is_empty());
        assert_eq!(s.view.rows.len(), 2);
    }

    #[test]
    fn select_all_and_clear_show_the_same_rows() {
        let mut s = state();
        s.select_all_questions();
        s.apply();
        let all = s.view.clone();

        s.clear_questions();
        s.apply();
        assert!(s.pending.questions.is_empty());
        assert_eq!(s.view.rows, all.rows);
    }
}
