use serde::Serialize;

use super::filter::{filtered_indices, Selection};
use super::model::{Metric, SurveyRow, SurveyTable};
use super::stats::{describe, pearson, Describe};

// ---------------------------------------------------------------------------
// Derived artifacts
// ---------------------------------------------------------------------------

/// A derived artifact, or the marker that no metric was selected and the
/// presentation layer should show a message instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Derived<T> {
    Ready(T),
    NothingSelected,
}

impl<T> Derived<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Derived::Ready(v) => Some(v),
            Derived::NothingSelected => None,
        }
    }

    pub fn is_nothing_selected(&self) -> bool {
        matches!(self, Derived::NothingSelected)
    }
}

/// One bar of the grouped comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub question: String,
    pub metric: Metric,
    pub value: f64,
}

/// Square correlation matrix over the selected metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Axis labels, in canonical metric order, shared by rows and columns.
    pub metrics: Vec<Metric>,
    /// Row-major `metrics.len() × metrics.len()` values.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Rounded descriptive statistics, one column per selected metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsTable {
    pub columns: Vec<(Metric, Describe)>,
}

impl StatsTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Rows as `(statistic name, value per column)`.
    pub fn rows(&self) -> Vec<(&'static str, Vec<f64>)> {
        if self.is_empty() {
            return Vec::new();
        }
        Describe::NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values = self.columns.iter().map(|(_, d)| d.values()[i]).collect();
                (*name, values)
            })
            .collect()
    }
}

/// Everything the dashboard renders after one "apply".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Included rows in table order.
    pub rows: Vec<SurveyRow>,
    pub comparison: Derived<Vec<SeriesPoint>>,
    pub correlation: Derived<CorrelationMatrix>,
    pub stats: StatsTable,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Recompute every artifact from scratch for the given selection.
pub fn derive_view(table: &SurveyTable, selection: &Selection) -> DashboardView {
    let rows: Vec<SurveyRow> = filtered_indices(table, selection)
        .into_iter()
        .map(|i| table.rows()[i].clone())
        .collect();
    let metrics: Vec<Metric> = selection.metrics.iter().copied().collect();

    log::debug!(
        "Derived view: {} of {} rows, {} metrics",
        rows.len(),
        table.len(),
        metrics.len()
    );

    DashboardView {
        comparison: comparison_series(&rows, &metrics),
        correlation: correlation_matrix(&rows, &metrics),
        stats: stats_table(&rows, &metrics),
        rows,
    }
}

/// Long-form series sorted by question id, then canonical metric order.
pub fn comparison_series(rows: &[SurveyRow], metrics: &[Metric]) -> Derived<Vec<SeriesPoint>> {
    if metrics.is_empty() {
        return Derived::NothingSelected;
    }
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .flat_map(|row| {
            metrics.iter().map(move |&metric| SeriesPoint {
                question: row.id.clone(),
                metric,
                value: row.value(metric),
            })
        })
        .collect();
    points.sort_by(|a, b| a.question.cmp(&b.question).then(a.metric.cmp(&b.metric)));
    Derived::Ready(points)
}

/// Pearson correlation between every pair of selected metrics.
pub fn correlation_matrix(rows: &[SurveyRow], metrics: &[Metric]) -> Derived<CorrelationMatrix> {
    if metrics.len() < 2 {
        return Derived::NothingSelected;
    }
    let columns: Vec<Vec<f64>> = metrics.iter().map(|&m| column(rows, m)).collect();

    let n = metrics.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                // A column correlates perfectly with itself whenever it varies.
                let own = pearson(&columns[i], &columns[i]);
                if own.is_nan() { own } else { 1.0 }
            } else {
                pearson(&columns[i], &columns[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Derived::Ready(CorrelationMatrix {
        metrics: metrics.to_vec(),
        values,
    })
}

/// Rounded `describe()` per selected metric; empty when none are selected.
pub fn stats_table(rows: &[SurveyRow], metrics: &[Metric]) -> StatsTable {
    StatsTable {
        columns: metrics
            .iter()
            .map(|&m| (m, describe(&column(rows, m)).rounded()))
            .collect(),
    }
}

fn column(rows: &[SurveyRow], metric: Metric) -> Vec<f64> {
    rows.iter().map(|r| r.value(metric)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, values: [f64; 4]) -> SurveyRow {
        SurveyRow {
            id: id.to_string(),
            summary: format!("設問 {id}"),
            values,
        }
    }

    fn stats_column(stats: &StatsTable, metric: Metric) -> Describe {
        stats
            .columns
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, d)| *d)
            .unwrap()
    }

    fn two_rows() -> SurveyTable {
        SurveyTable::from_rows(vec![
            row("Q1", [50.0, 40.0, 60.0, 30.0]),
            row("Q2", [70.0, 60.0, 80.0, 50.0]),
        ])
        .unwrap()
    }

    fn wide() -> SurveyTable {
        SurveyTable::from_rows(vec![
            row("Q3", [12.0, 40.0, 33.0, 7.0]),
            row("Q1", [55.0, 20.0, 61.0, 30.0]),
            row("Q4", [71.0, 65.0, 18.0, 52.0]),
            row("Q2", [38.0, 90.0, 44.0, 11.0]),
        ])
        .unwrap()
    }

    #[test]
    fn end_to_end_single_metric() {
        let table = two_rows();
        let sel = Selection::from_names(["Q1", "Q2"], ["全体 (%)"]).unwrap();
        let view = derive_view(&table, &sel);

        assert_eq!(
            view.comparison,
            Derived::Ready(vec![
                SeriesPoint {
                    question: "Q1".into(),
                    metric: Metric::Overall,
                    value: 50.0,
                },
                SeriesPoint {
                    question: "Q2".into(),
                    metric: Metric::Overall,
                    value: 70.0,
                },
            ])
        );

        let d = stats_column(&view.stats, Metric::Overall);
        assert_eq!(d.count, 2.0);
        assert_eq!(d.mean, 60.0);
        assert_eq!(d.min, 50.0);
        assert_eq!(d.max, 70.0);

        // One metric is not enough for a correlation.
        assert!(view.correlation.is_nothing_selected());
    }

    #[test]
    fn stats_round_half_to_even() {
        let table = SurveyTable::from_rows(vec![
            row("Q1", [12.0, 0.0, 0.0, 0.0]),
            row("Q2", [12.5, 0.0, 0.0, 0.0]),
        ])
        .unwrap();
        let view = derive_view(&table, &Selection::new(Vec::<String>::new(), [Metric::Overall]));

        let d = stats_column(&view.stats, Metric::Overall);
        assert_eq!(d.mean, 12.2);
        assert_eq!(d.q50, 12.2);
        assert_eq!(d.max, 12.5);
    }

    #[test]
    fn series_sorted_by_id_then_canonical_metric_order() {
        let table = SurveyTable::from_rows(vec![
            row("Q2", [1.0, 2.0, 3.0, 4.0]),
            row("Q1", [5.0, 6.0, 7.0, 8.0]),
        ])
        .unwrap();
        let sel =
            Selection::from_names(Vec::<String>::new(), ["脳腫瘍 (%)", "全体 (%)"]).unwrap();
        let view = derive_view(&table, &sel);

        let order: Vec<(String, Metric)> = view
            .comparison
            .ready()
            .unwrap()
            .iter()
            .map(|p| (p.question.clone(), p.metric))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Q1".to_string(), Metric::Overall),
                ("Q1".to_string(), Metric::Brain),
                ("Q2".to_string(), Metric::Overall),
                ("Q2".to_string(), Metric::Brain),
            ]
        );
    }

    #[test]
    fn empty_metric_selection_yields_sentinels() {
        let table = wide();
        for ids in [vec![], vec!["Q1"], vec!["Q1", "Q4"], vec!["Q9"]] {
            let view = derive_view(&table, &Selection::new(ids, []));
            assert!(view.comparison.is_nothing_selected());
            assert!(view.correlation.is_nothing_selected());
            assert!(view.stats.is_empty());
            assert!(view.stats.rows().is_empty());
        }
    }

    #[test]
    fn empty_question_selection_shows_full_table() {
        let table = wide();
        let view = derive_view(&table, &Selection::new(Vec::<String>::new(), [Metric::Overall]));
        assert_eq!(view.rows, table.rows().to_vec());
    }

    #[test]
    fn filtered_rows_keep_original_order() {
        let table = wide();
        let view = derive_view(&table, &Selection::new(["Q2", "Q3"], [Metric::Solid]));
        let ids: Vec<&str> = view.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Q3", "Q2"]);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let table = wide();
        let view = derive_view(&table, &Selection::new(Vec::<String>::new(), Metric::ALL));
        let corr = view.correlation.ready().unwrap();

        assert_eq!(corr.metrics, Metric::ALL.to_vec());
        for i in 0..4 {
            assert!((corr.get(i, i) - 1.0).abs() < 1e-12);
            for j in 0..4 {
                assert!((corr.get(i, j) - corr.get(j, i)).abs() < 1e-12);
                assert!((-1.0..=1.0).contains(&corr.get(i, j)));
            }
        }
    }

    #[test]
    fn correlation_restricted_to_included_rows() {
        let table = SurveyTable::from_rows(vec![
            row("Q1", [1.0, 2.0, 0.0, 0.0]),
            row("Q2", [2.0, 4.0, 0.0, 0.0]),
            row("Q3", [3.0, 1.0, 0.0, 0.0]),
        ])
        .unwrap();

        let pair = [Metric::Overall, Metric::Hematologic];
        let all = derive_view(&table, &Selection::new(Vec::<String>::new(), pair));
        let some = derive_view(&table, &Selection::new(["Q1", "Q2"], pair));

        assert!((some.correlation.ready().unwrap().get(0, 1) - 1.0).abs() < 1e-12);
        assert!(all.correlation.ready().unwrap().get(0, 1) < 1.0);
    }

    #[test]
    fn correlation_with_single_row_is_undefined() {
        let table = wide();
        let view = derive_view(&table, &Selection::new(["Q1"], [Metric::Overall, Metric::Brain]));
        let corr = view.correlation.ready().unwrap();
        assert!(corr.get(0, 1).is_nan());
        assert!(corr.get(0, 0).is_nan());
    }

    #[test]
    fn stats_rows_follow_describe_layout() {
        let table = SurveyTable::from_rows(vec![
            row("Q1", [10.0, 1.0, 0.0, 0.0]),
            row("Q2", [20.0, 2.0, 0.0, 0.0]),
            row("Q3", [30.0, 3.0, 0.0, 0.0]),
        ])
        .unwrap();
        let sel = Selection::new(Vec::<String>::new(), [Metric::Hematologic, Metric::Overall]);
        let rows = derive_view(&table, &sel).stats.rows();

        let names: Vec<&str> = rows.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, Describe::NAMES.to_vec());
        // mean row, columns in canonical order: 全体 then 造血器腫瘍
        assert_eq!(rows[1].1, vec![20.0, 2.0]);
    }

    #[test]
    fn missing_value_is_carried_into_series_and_skipped_in_stats() {
        let table = SurveyTable::from_rows(vec![
            row("Q1", [f64::NAN, 0.0, 0.0, 0.0]),
            row("Q2", [40.0, 0.0, 0.0, 0.0]),
        ])
        .unwrap();
        let view = derive_view(&table, &Selection::new(Vec::<String>::new(), [Metric::Overall]));
        assert!(view.comparison.ready().unwrap()[0].value.is_nan());
        assert_eq!(stats_column(&view.stats, Metric::Overall).count, 1.0);
    }

    #[test]
    fn recomputation_is_pure() {
        let table = wide();
        let sel = Selection::new(
            ["Q4", "Q2", "Q1"],
            [Metric::Solid, Metric::Brain, Metric::Overall],
        );
        let first = derive_view(&table, &sel);
        let _other = derive_view(&table, &Selection::default());
        let second = derive_view(&table, &sel);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}
