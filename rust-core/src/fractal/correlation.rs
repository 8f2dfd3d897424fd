//! Correlation dimension (Grassberger-Procaccia)
//!
//! Consecutive samples form a two-dimensional delay embedding with lag 1.
//! The correlation integral C(r) is the fraction of unordered point pairs
//! closer than r. Pairwise distances are computed once and sorted, so each
//! radius is a binary search; the pass is still O(n²) in time and memory, so
//! callers should bound the window length.

use super::analysis::FractalConfig;
use super::{fit_log_log, signal_range, ScalePoint, SENTINEL_DIMENSION};
use crate::error::AnalysisResult;
use crate::numeric::{euclidean_distance, sanitize_samples};
use serde::Serialize;
use tracing::trace;

/// Correlation-dimension estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub dimension: f64,
    /// (radius, correlation integral)
    pub curve: Vec<ScalePoint>,
    pub r_squared: Option<f64>,
}

impl CorrelationResult {
    fn sentinel(curve: Vec<ScalePoint>) -> Self {
        Self {
            dimension: SENTINEL_DIMENSION,
            curve,
            r_squared: None,
        }
    }
}

/// `count` radii spaced evenly in log space from `min` to `max`
pub(crate) fn log_spaced_radii(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let (log_min, log_max) = (min.ln(), max.ln());
            let step = (log_max - log_min) / (count - 1) as f64;
            (0..count)
                .map(|i| (log_min + step * i as f64).exp())
                .collect()
        }
    }
}

fn sorted_pair_distances(points: &[[f64; 2]]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            let distance = euclidean_distance(p, q);
            if !distance.is_nan() {
                distances.push(distance);
            }
        }
    }
    distances.sort_unstable_by(f64::total_cmp);
    distances
}

/// Estimate the correlation dimension of `signal`
///
/// Non-finite samples are treated as 0.
///
/// # Errors
/// Returns [`ConfigurationError`](crate::ConfigurationError) if `config`
/// fails [`FractalConfig::validate`]
pub fn correlation_dimension(
    signal: &[f64],
    config: &FractalConfig,
) -> AnalysisResult<CorrelationResult> {
    config.validate()?;
    let (signal, _) = sanitize_samples(signal);
    Ok(estimate(&signal, config))
}

/// Estimator body; `config` must already be validated
pub(crate) fn estimate(signal: &[f64], config: &FractalConfig) -> CorrelationResult {
    let (min, max) = signal_range(signal);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        trace!(estimator = "correlation", len = signal.len(), "zero range, using sentinel");
        return CorrelationResult::sentinel(Vec::new());
    }

    let embedded: Vec<[f64; 2]> = signal.windows(2).map(|w| [w[0], w[1]]).collect();
    if embedded.len() < 2 {
        trace!(estimator = "correlation", len = signal.len(), "too few embedded points");
        return CorrelationResult::sentinel(Vec::new());
    }

    let distances = sorted_pair_distances(&embedded);
    let total_pairs = (embedded.len() * (embedded.len() - 1) / 2) as f64;

    let curve: Vec<ScalePoint> = log_spaced_radii(
        config.min_distance,
        config.max_distance,
        config.correlation_points,
    )
    .into_iter()
    .map(|radius| {
        let close = distances.partition_point(|&d| d < radius);
        ScalePoint {
            scale: radius,
            measure: close as f64 / total_pairs,
        }
    })
    .collect();

    let (log_r, log_c): (Vec<f64>, Vec<f64>) = curve
        .iter()
        .filter(|p| p.measure > 0.0)
        .map(|p| (p.scale.ln(), p.measure.ln()))
        .unzip();

    match fit_log_log(&log_r, &log_c) {
        Some(fit) => CorrelationResult {
            dimension: fit.slope.max(0.0),
            curve,
            r_squared: Some(fit.r_squared),
        },
        None => {
            trace!(
                estimator = "correlation",
                len = signal.len(),
                "fewer than two radii with close pairs, using sentinel"
            );
            CorrelationResult::sentinel(curve)
        }
    }
}
