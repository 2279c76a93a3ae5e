use std::collections::BTreeSet;

use super::model::{Metric, SurveyError, SurveyTable};

// ---------------------------------------------------------------------------
// Selection: which questions and metrics the user asked for
// ---------------------------------------------------------------------------

/// The user's selection at the moment "apply" was pressed.
///
/// The two halves treat emptiness differently:
/// * no questions selected → every row is shown
/// * no metrics selected → nothing is compared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub questions: BTreeSet<String>,
    pub metrics: BTreeSet<Metric>,
}

impl Selection {
    pub fn new<I, S, M>(questions: I, metrics: M) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        M: IntoIterator<Item = Metric>,
    {
        Selection {
            questions: questions.into_iter().map(Into::into).collect(),
            metrics: metrics.into_iter().collect(),
        }
    }

    /// Build a selection from metric labels, rejecting unknown names.
    pub fn from_names<I, S, N, T>(questions: I, metric_names: N) -> Result<Self, SurveyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        N: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let metrics = metric_names
            .into_iter()
            .map(|name| name.as_ref().parse::<Metric>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Selection::new(questions, metrics))
    }

    /// Whether a question id passes the row filter.
    pub fn includes_question(&self, id: &str) -> bool {
        self.questions.is_empty() || self.questions.contains(id)
    }
}

/// Return indices of rows that pass the question filter, in table order.
///
/// Ids that do not exist in the table simply match nothing.
pub fn filtered_indices(table: &SurveyTable, selection: &Selection) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.includes_question(&row.id))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SurveyRow;

    fn table() -> SurveyTable {
        let rows = ["Q1", "Q2", "Q3", "Q4"]
            .iter()
            .enumerate()
            .map(|(i, id)| SurveyRow {
                id: id.to_string(),
                summary: String::new(),
                values: [i as f64; 4],
            })
            .collect();
        SurveyTable::from_rows(rows).unwrap()
    }

    #[test]
    fn empty_question_selection_keeps_every_row() {
        let t = table();
        let sel = Selection::new(Vec::<String>::new(), []);
        assert_eq!(filtered_indices(&t, &sel), vec![0, 1, 2, 3]);
    }

    #[test]
    fn selected_rows_keep_table_order() {
        let t = table();
        let sel = Selection::new(["Q3", "Q1"], []);
        assert_eq!(filtered_indices(&t, &sel), vec![0, 2]);
    }

    #[test]
    fn unknown_ids_match_nothing() {
        let t = table();
        let sel = Selection::new(["Q9", "Q2"], []);
        assert_eq!(filtered_indices(&t, &sel), vec![1]);

        let sel = Selection::new(["Q9"], []);
        assert!(filtered_indices(&t, &sel).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = table();
        for ids in [vec![], vec!["Q2"], vec!["Q4", "Q1"], vec!["Q5"]] {
            let sel = Selection::new(ids, []);
            let once: Vec<SurveyRow> = filtered_indices(&t, &sel)
                .into_iter()
                .map(|i| t.rows()[i].clone())
                .collect();
            let refiltered = SurveyTable::from_rows(once.clone()).unwrap();
            let twice: Vec<SurveyRow> = filtered_indices(&refiltered, &sel)
                .into_iter()
                .map(|i| refiltered.rows()[i].clone())
                .collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn from_names_validates_metrics() {
        let sel = Selection::from_names(["Q1"], ["脳腫瘍 (%)", "全体 (%)"]).unwrap();
        assert_eq!(
            sel.metrics.iter().copied().collect::<Vec<_>>(),
            vec![Metric::Overall, Metric::Brain]
        );

        let err = Selection::from_names(["Q1"], ["全体"]).unwrap_err();
        assert_eq!(err, SurveyError::UnknownMetric("全体".to_string()));
    }
}
