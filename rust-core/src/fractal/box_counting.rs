//! Box-counting dimension
//!
//! The signal is min-max normalized to [0, 1] and laid on a grid whose cell
//! for sample `i` at box size `s` is `(i / s, floor(normalized[i] * s))`.
//! The number of distinct occupied cells is regressed against box size in
//! log-log space. Occupied-cell count falls as box size grows, so the
//! dimension is the negated slope. The other estimators use their raw
//! slope.

use super::analysis::FractalConfig;
use super::{fit_log_log, signal_range, ScalePoint, SENTINEL_DIMENSION};
use crate::error::AnalysisResult;
use crate::numeric::sanitize_samples;
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

/// Box-counting estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxCountingResult {
    pub dimension: f64,
    /// (box size, occupied cells)
    pub curve: Vec<ScalePoint>,
    /// R² of the log-log fit; `None` when the sentinel was used
    pub r_squared: Option<f64>,
}

impl BoxCountingResult {
    fn sentinel(curve: Vec<ScalePoint>) -> Self {
        Self {
            dimension: SENTINEL_DIMENSION,
            curve,
            r_squared: None,
        }
    }
}

/// Box sizes `min, 2·min, 4·min, ...` up to `min(max_box_size, n / 4)`
fn box_sizes(n: usize, config: &FractalConfig) -> Vec<usize> {
    let upper = config.max_box_size.min(n / 4);
    let mut sizes = Vec::new();
    let mut size = config.min_box_size;
    while size <= upper {
        sizes.push(size);
        size = match size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    sizes
}

fn count_occupied(normalized: &[f64], box_size: usize) -> usize {
    let scale = box_size as f64;
    normalized
        .iter()
        .enumerate()
        .map(|(i, &v)| (i / box_size, (v * scale).floor() as usize))
        .collect::<HashSet<_>>()
        .len()
}

/// Estimate the box-counting dimension of `signal`
///
/// Non-finite samples are treated as 0.
///
/// # Errors
/// Returns [`ConfigurationError`](crate::ConfigurationError) if `config`
/// fails [`FractalConfig::validate`]
pub fn box_counting_dimension(
    signal: &[f64],
    config: &FractalConfig,
) -> AnalysisResult<BoxCountingResult> {
    config.validate()?;
    let (signal, _) = sanitize_samples(signal);
    Ok(estimate(&signal, config))
}

/// Estimator body; `config` must already be validated
pub(crate) fn estimate(signal: &[f64], config: &FractalConfig) -> BoxCountingResult {
    let (min, max) = signal_range(signal);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        trace!(estimator = "box_counting", len = signal.len(), "zero range, using sentinel");
        return BoxCountingResult::sentinel(Vec::new());
    }

    let normalized: Vec<f64> = signal.iter().map(|&v| (v - min) / range).collect();

    let curve: Vec<ScalePoint> = box_sizes(signal.len(), config)
        .into_iter()
        .map(|size| ScalePoint {
            scale: size as f64,
            measure: count_occupied(&normalized, size) as f64,
        })
        .collect();

    let log_sizes: Vec<f64> = curve.iter().map(|p| p.scale.ln()).collect();
    let log_counts: Vec<f64> = curve.iter().map(|p| p.measure.ln()).collect();

    match fit_log_log(&log_sizes, &log_counts) {
        Some(fit) => BoxCountingResult {
            dimension: -fit.slope,
            curve,
            r_squared: Some(fit.r_squared),
        },
        None => {
            trace!(
                estimator = "box_counting",
                len = signal.len(),
                scales = curve.len(),
                "too few box sizes, using sentinel"
            );
            BoxCountingResult::sentinel(curve)
        }
    }
}
