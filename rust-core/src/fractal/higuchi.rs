//! Higuchi fractal dimension
//!
//! For each interval `k`, the curve length `L(k)` is the mean over the `k`
//! phase offsets of the normalized length of the decimated series. For a
//! fractal curve `L(k) ∝ k^-D`, so `D` is the slope of `ln L(k)` against
//! `ln(1/k)`, clamped to [1, 2].

use super::analysis::FractalConfig;
use super::{fit_log_log, signal_range, ScalePoint, SENTINEL_DIMENSION};
use crate::error::AnalysisResult;
use crate::numeric::sanitize_samples;
use serde::Serialize;
use tracing::trace;

/// Higuchi estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiguchiResult {
    /// Dimension in [1, 2]
    pub dimension: f64,
    /// (k, L(k))
    pub curve: Vec<ScalePoint>,
    pub r_squared: Option<f64>,
}

impl HiguchiResult {
    fn sentinel(curve: Vec<ScalePoint>) -> Self {
        Self {
            dimension: SENTINEL_DIMENSION,
            curve,
            r_squared: None,
        }
    }
}

/// Mean normalized curve length at interval `k`
fn curve_length(signal: &[f64], k: usize) -> f64 {
    let n = signal.len();
    let mut total = 0.0;

    for m in 1..=k {
        let start = m - 1;
        let num_points = (n - m) / k;
        if num_points == 0 {
            continue;
        }

        let length: f64 = (1..=num_points)
            .map(|i| (signal[start + i * k] - signal[start + (i - 1) * k]).abs())
            .sum();

        let normalization = (n - 1) as f64 / (num_points * k * k) as f64;
        total += length * normalization;
    }

    total / k as f64
}

/// Estimate the Higuchi fractal dimension of `signal`
///
/// Non-finite samples are treated as 0.
///
/// # Errors
/// Returns [`ConfigurationError`](crate::ConfigurationError) if `config`
/// fails [`FractalConfig::validate`]
pub fn higuchi_dimension(
    signal: &[f64],
    config: &FractalConfig,
) -> AnalysisResult<HiguchiResult> {
    config.validate()?;
    let (signal, _) = sanitize_samples(signal);
    Ok(estimate(&signal, config))
}

/// Estimator body; `config` must already be validated
pub(crate) fn estimate(signal: &[f64], config: &FractalConfig) -> HiguchiResult {
    let n = signal.len();
    let (min, max) = signal_range(signal);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        trace!(estimator = "higuchi", len = n, "zero range, using sentinel");
        return HiguchiResult::sentinel(Vec::new());
    }

    let upper = config.max_k.min(n / 4);
    // Lengths that overflow are dropped from the curve and the fit alike
    let curve: Vec<ScalePoint> = (config.min_k..=upper)
        .map(|k| ScalePoint {
            scale: k as f64,
            measure: curve_length(signal, k),
        })
        .filter(|p| p.measure.is_finite())
        .collect();

    let (log_inv_k, log_length): (Vec<f64>, Vec<f64>) = curve
        .iter()
        .filter(|p| p.measure > 0.0)
        .map(|p| ((1.0 / p.scale).ln(), p.measure.ln()))
        .unzip();

    match fit_log_log(&log_inv_k, &log_length) {
        Some(fit) => HiguchiResult {
            dimension: fit.slope.clamp(1.0, 2.0),
            curve,
            r_squared: Some(fit.r_squared),
        },
        None => {
            trace!(estimator = "higuchi", len = n, "too few intervals, using sentinel");
            HiguchiResult::sentinel(curve)
        }
    }
}
