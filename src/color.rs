use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Metric;

// ---------------------------------------------------------------------------
// Metric colours
// ---------------------------------------------------------------------------

/// Fixed colour for each metric, used by the bar chart series, the legend
/// and the metric checklist.
pub fn metric_color(metric: Metric) -> Color32 {
    match metric {
        Metric::Overall => Color32::from_rgb(0x63, 0x6e, 0xfa),
        Metric::Hematologic => Color32::from_rgb(0xef, 0x55, 0x3b),
        Metric::Solid => Color32::from_rgb(0x00, 0xcc, 0x96),
        Metric::Brain => Color32::from_rgb(0xab, 0x63, 0xfa),
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation values
// ---------------------------------------------------------------------------

const NEGATIVE: (u8, u8, u8) = (0x21, 0x66, 0xac);
const NEUTRAL: (u8, u8, u8) = (0xf7, 0xf7, 0xf7);
const POSITIVE: (u8, u8, u8) = (0xb2, 0x18, 0x2b);

/// Colour for the heatmap cells: blue at -1, near-white at 0, red at 1.
///
/// Values outside [-1, 1] are clamped; NaN maps to grey.
pub fn diverging_color(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::GRAY;
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    let (from, to, t) = if v < 0.0 {
        (NEGATIVE, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, POSITIVE, v)
    };
    let mixed = linear(from).mix(linear(to), t);
    let rgb: Srgb<u8> = Srgb::from_linear(mixed);
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Dark text on light cells, light text on saturated ones.
pub fn text_color_on(value: f64) -> Color32 {
    if value.is_nan() || value.abs() < 0.6 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}
