use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot, PlotBounds};

use crate::color::{diverging_color, metric_color, text_color_on};
use crate::data::model::Metric;
use crate::data::pipeline::{CorrelationMatrix, Derived, SeriesPoint};

/// Total width taken by one question's group of bars.
const GROUP_WIDTH: f64 = 0.8;
/// The value axis always spans the percentage range.
const Y_RANGE: (f64, f64) = (0.0, 100.0);

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

/// Render the metric comparison as grouped bars, one colour per metric.
pub fn comparison_chart(ui: &mut Ui, series: &Derived<Vec<SeriesPoint>>) {
    let Some(points) = series.ready() else {
        placeholder(ui, "データが選択されていません");
        return;
    };

    let groups = group_positions(points);
    let metrics = series_metrics(points);
    let bar_width = GROUP_WIDTH / metrics.len().max(1) as f64;

    let labels: Vec<String> = groups.clone();
    Plot::new("comparison_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("問番号")
        .y_axis_label("値 (%)")
        .include_y(Y_RANGE.0)
        .include_y(Y_RANGE.1)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.5, Y_RANGE.0],
                [groups.len() as f64 - 0.5, Y_RANGE.1],
            ));
            for (k, &metric) in metrics.iter().enumerate() {
                let offset = (k as f64 - (metrics.len() as f64 - 1.0) / 2.0) * bar_width;
                let bars: Vec<Bar> = points
                    .iter()
                    .filter(|p| p.metric == metric && !p.value.is_nan())
                    .filter_map(|p| {
                        let x = groups.iter().position(|q| *q == p.question)? as f64;
                        let bar = Bar::new(x + offset, p.value)
                            .width(bar_width * 0.95)
                            .name(bar_name(p));
                        Some(if out_of_range(p.value) {
                            bar.stroke(Stroke::new(2.0, Color32::RED))
                        } else {
                            bar
                        })
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(metric.label())
                        .color(metric_color(metric)),
                );
            }
        });
}

/// Values outside the fixed axis run past the plot edge; they are drawn
/// unchanged but outlined and labelled so they are not mistaken for 0 or 100.
fn out_of_range(value: f64) -> bool {
    value < Y_RANGE.0 || value > Y_RANGE.1
}

fn bar_name(point: &SeriesPoint) -> String {
    let name = format!("{} {}", point.question, point.metric.label());
    if out_of_range(point.value) {
        format!("{name} (軸範囲外: {})", point.value)
    } else {
        name
    }
}

/// Distinct question ids in series order; the index is the x position.
fn group_positions(points: &[SeriesPoint]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for p in points {
        if groups.last() != Some(&p.question) {
            groups.push(p.question.clone());
        }
    }
    groups
}

/// Metrics present in the series, in canonical order.
fn series_metrics(points: &[SeriesPoint]) -> Vec<Metric> {
    Metric::ALL
        .into_iter()
        .filter(|m| points.iter().any(|p| p.metric == *m))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const LABEL_WIDTH: f32 = 210.0;
const HEADER_HEIGHT: f32 = 40.0;
const CELL: f32 = 120.0;
const CELL_HEIGHT: f32 = 48.0;

/// Render the correlation matrix as an annotated heatmap on a fixed
/// diverging scale from -1 to 1.
pub fn correlation_heatmap(ui: &mut Ui, correlation: &Derived<CorrelationMatrix>) {
    let Some(matrix) = correlation.ready() else {
        placeholder(ui, "相関を表示するには指標を2つ以上選択してください");
        return;
    };

    let n = matrix.metrics.len();
    let size = egui::vec2(
        LABEL_WIDTH + CELL * n as f32,
        HEADER_HEIGHT + CELL_HEIGHT * n as f32,
    );
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let label_font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();

    for (j, metric) in matrix.metrics.iter().enumerate() {
        let pos = rect.left_top()
            + egui::vec2(LABEL_WIDTH + CELL * (j as f32 + 0.5), HEADER_HEIGHT * 0.5);
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            short_label(*metric),
            label_font.clone(),
            text_color,
        );
    }

    for (i, metric) in matrix.metrics.iter().enumerate() {
        let top = rect.top() + HEADER_HEIGHT + CELL_HEIGHT * i as f32;
        painter.text(
            egui::pos2(rect.left() + LABEL_WIDTH - 8.0, top + CELL_HEIGHT * 0.5),
            Align2::RIGHT_CENTER,
            metric.label(),
            label_font.clone(),
            text_color,
        );

        for j in 0..n {
            let value = matrix.get(i, j);
            let cell = egui::Rect::from_min_size(
                egui::pos2(rect.left() + LABEL_WIDTH + CELL * j as f32, top),
                egui::vec2(CELL, CELL_HEIGHT),
            );
            painter.rect_filled(cell, 0.0, diverging_color(value));
            painter.rect_stroke(
                cell,
                0.0,
                Stroke::new(1.0, Color32::from_gray(60)),
                egui::StrokeKind::Inside,
            );
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                format_correlation(value),
                FontId::monospace(14.0),
                text_color_on(value),
            );
        }
    }

    color_scale_legend(ui);
}

/// Horizontal gradient bar labelled -1, 0 and 1.
fn color_scale_legend(ui: &mut Ui) {
    const STEPS: usize = 40;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 30.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let bar_height = 12.0;
    let step_width = rect.width() / STEPS as f32;

    for s in 0..STEPS {
        let value = -1.0 + 2.0 * (s as f64 + 0.5) / STEPS as f64;
        let cell = egui::Rect::from_min_size(
            egui::pos2(rect.left() + step_width * s as f32, rect.top()),
            egui::vec2(step_width + 0.5, bar_height),
        );
        painter.rect_filled(cell, 0.0, diverging_color(value));
    }

    let font = FontId::proportional(11.0);
    let color = ui.visuals().text_color();
    let y = rect.top() + bar_height + 2.0;
    let ticks = [
        (rect.left(), Align2::LEFT_TOP, "-1"),
        (rect.center().x, Align2::CENTER_TOP, "0"),
        (rect.right(), Align2::RIGHT_TOP, "1"),
    ];
    for (x, align, text) in ticks {
        painter.text(egui::pos2(x, y), align, text, font.clone(), color);
    }
}

fn short_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Overall => "全体",
        Metric::Hematologic => "造血器腫瘍",
        Metric::Solid => "固形腫瘍",
        Metric::Brain => "脳腫瘍",
    }
}

fn format_correlation(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn placeholder(ui: &mut Ui, message: &str) {
    ui.add_space(12.0);
    ui.label(egui::RichText::new(message).italics().color(Color32::GRAY));
    ui.add_space(12.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(q: &str, metric: Metric) -> SeriesPoint {
        SeriesPoint {
            question: q.to_string(),
            metric,
            value: 1.0,
        }
    }

    #[test]
    fn groups_follow_series_order() {
        let points = vec![
            point("Q1", Metric::Overall),
            point("Q1", Metric::Brain),
            point("Q2", Metric::Overall),
            point("Q2", Metric::Brain),
        ];
        assert_eq!(group_positions(&points), vec!["Q1", "Q2"]);
        assert_eq!(series_metrics(&points), vec![Metric::Overall, Metric::Brain]);
    }

    #[test]
    fn values_beyond_the_axis_keep_their_height() {
        assert!(!out_of_range(0.0));
        assert!(!out_of_range(100.0));
        assert!(out_of_range(120.0));
        assert!(out_of_range(-5.0));

        let over = SeriesPoint {
            question: "Q1".to_string(),
            metric: Metric::Overall,
            value: 120.0,
        };
        assert_eq!(bar_name(&over), "Q1 全体 (%) (軸範囲外: 120)");
        assert_eq!(bar_name(&point("Q2", Metric::Brain)), "Q2 脳腫瘍 (%)");
    }

    #[test]
    fn correlation_formatting() {
        assert_eq!(format_correlation(0.8765), "0.88");
        assert_eq!(format_correlation(-1.0), "-1.00");
        assert_eq!(format_correlation(f64::NAN), "NaN");
    }
}
