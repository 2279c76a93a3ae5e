//! Descriptive statistics and correlation over metric columns.
//!
//! The arithmetic is delegated to `pandrs::stats`. Missing values (NaN) are
//! dropped before each call, so `count` reports the number of observed
//! values and correlation uses pairwise-complete rows. Statistics that are
//! undefined for the observations at hand come back as NaN.

use serde::Serialize;

/// Summary of one column, matching the usual `describe()` rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Describe {
    pub count: f64,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    /// A column where nothing beyond `count` can be computed.
    fn undefined(count: f64) -> Self {
        Describe {
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Row names in display order.
    pub const NAMES: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in the same order as [`Describe::NAMES`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count, self.mean, self.std, self.min, self.q25, self.q50, self.q75, self.max,
        ]
    }

    /// Every statistic rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Describe {
            count: round1(self.count),
            mean: round1(self.mean),
            std: round1(self.std),
            min: round1(self.min),
            q25: round1(self.q25),
            q50: round1(self.q50),
            q75: round1(self.q75),
            max: round1(self.max),
        }
    }
}

/// Describe a column: count, mean, sample std, min, linearly interpolated
/// quartiles and max. Everything is NaN for zero values, `std` for one.
pub fn describe(values: &[f64]) -> Describe {
    let observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();

    match observed.len() {
        0 => Describe::undefined(0.0),
        1 => {
            let v = observed[0];
            Describe {
                count: 1.0,
                mean: v,
                std: f64::NAN,
                min: v,
                q25: v,
                q50: v,
                q75: v,
                max: v,
            }
        }
        n => match pandrs::stats::describe(observed) {
            Ok(stats) => Describe {
                count: stats.count as f64,
                mean: stats.mean,
                std: stats.std,
                min: stats.min,
                q25: stats.q1,
                q50: stats.median,
                q75: stats.q3,
                max: stats.max,
            },
            Err(e) => {
                log::warn!("describe over {n} values failed: {e}");
                Describe::undefined(n as f64)
            }
        },
    }
}

/// Pearson correlation over the pairs where both values are present.
///
/// NaN when fewer than two pairs remain or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .unzip();

    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return f64::NAN;
    }

    match pandrs::stats::correlation(&xs, &ys) {
        Ok(r) if r.is_finite() => r.clamp(-1.0, 1.0),
        Ok(_) => f64::NAN,
        Err(e) => {
            log::warn!("correlation over {} pairs failed: {e}", xs.len());
            f64::NAN
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Round half to even at one decimal place, as `describe().round(1)` does.
/// NaN stays NaN.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}
