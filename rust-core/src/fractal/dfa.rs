//! Detrended fluctuation analysis
//!
//! The mean-removed cumulative sum ("profile") is cut into non-overlapping
//! windows. Each window is detrended with a least-squares line, and the RMS
//! of the residuals across all windows gives the fluctuation `F(s)`. The
//! scaling exponent is the slope of `ln F(s)` against `ln s`, clamped to
//! [0, 2].

use super::analysis::FractalConfig;
use super::{fit_log_log, signal_range, ScalePoint};
use crate::error::AnalysisResult;
use crate::numeric::{linear_fit, sanitize_samples};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Exponent reported when fewer than two window sizes are usable
pub const SENTINEL_EXPONENT: f64 = 0.5;

/// Correlation regime implied by a DFA exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DfaClassification {
    /// α < 0.5
    AntiPersistent,
    /// α = 0.5 exactly
    Random,
    /// 0.5 < α ≤ 1
    Persistent,
    /// α > 1
    NonStationary,
}

impl DfaClassification {
    pub fn from_exponent(exponent: f64) -> Self {
        if exponent < 0.5 {
            DfaClassification::AntiPersistent
        } else if exponent == 0.5 {
            DfaClassification::Random
        } else if exponent <= 1.0 {
            DfaClassification::Persistent
        } else {
            DfaClassification::NonStationary
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DfaClassification::AntiPersistent => "anti-persistent",
            DfaClassification::Random => "random",
            DfaClassification::Persistent => "persistent",
            DfaClassification::NonStationary => "non-stationary",
        }
    }
}

impl fmt::Display for DfaClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DFA estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DfaResult {
    /// Scaling exponent α in [0, 2]
    pub exponent: f64,
    /// (window size, F(window size))
    pub curve: Vec<ScalePoint>,
    pub r_squared: Option<f64>,
    pub classification: DfaClassification,
}

impl DfaResult {
    fn sentinel(curve: Vec<ScalePoint>) -> Self {
        Self {
            exponent: SENTINEL_EXPONENT,
            curve,
            r_squared: None,
            classification: DfaClassification::Random,
        }
    }
}

/// Mean-removed cumulative sum
pub(crate) fn profile(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    signal
        .iter()
        .scan(0.0, |cumsum, &v| {
            *cumsum += v - mean;
            Some(*cumsum)
        })
        .collect()
}

/// Window sizes growing by ×1.2 (rounded up, always advancing) from
/// `min_window_size` to `min(max_window_size, n / 4)`
pub(crate) fn window_sizes(n: usize, config: &FractalConfig) -> Vec<usize> {
    let upper = config.max_window_size.min(n / 4);
    let mut sizes = Vec::new();
    let mut size = config.min_window_size;
    while size <= upper {
        sizes.push(size);
        let grown = (size as f64 * 1.2).ceil() as usize;
        size = grown.max(size + 1);
    }
    sizes
}

/// RMS of linearly detrended residuals over non-overlapping windows
fn fluctuation(profile: &[f64], window_size: usize) -> f64 {
    let num_windows = profile.len() / window_size;
    if num_windows == 0 {
        return 0.0;
    }

    let x: Vec<f64> = (0..window_size).map(|i| i as f64).collect();
    let mut total = 0.0;

    for segment in profile.chunks_exact(window_size) {
        let fit = linear_fit(&x, segment);
        let squared: f64 = x
            .iter()
            .zip(segment)
            .map(|(&xi, &yi)| {
                let residual = yi - (fit.slope * xi + fit.intercept);
                residual * residual
            })
            .sum();
        total += squared / window_size as f64;
    }

    (total / num_windows as f64).sqrt()
}

/// Run detrended fluctuation analysis on `signal`
///
/// Non-finite samples are treated as 0.
///
/// # Errors
/// Returns [`ConfigurationError`](crate::ConfigurationError) if `config`
/// fails [`FractalConfig::validate`]
pub fn detrended_fluctuation(
    signal: &[f64],
    config: &FractalConfig,
) -> AnalysisResult<DfaResult> {
    config.validate()?;
    let (signal, _) = sanitize_samples(signal);
    Ok(estimate(&signal, config))
}

/// Estimator body; `config` must already be validated
pub(crate) fn estimate(signal: &[f64], config: &FractalConfig) -> DfaResult {
    // A constant signal's profile is only rounding residue
    let (min, max) = signal_range(signal);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        trace!(estimator = "dfa", len = signal.len(), "zero range, using sentinel");
        return DfaResult::sentinel(Vec::new());
    }

    let profile = profile(signal);

    let curve: Vec<ScalePoint> = window_sizes(signal.len(), config)
        .into_iter()
        .map(|size| ScalePoint {
            scale: size as f64,
            measure: fluctuation(&profile, size),
        })
        .filter(|p| p.measure.is_finite())
        .collect();

    let (log_s, log_f): (Vec<f64>, Vec<f64>) = curve
        .iter()
        .filter(|p| p.measure > 0.0)
        .map(|p| (p.scale.ln(), p.measure.ln()))
        .unzip();

    match fit_log_log(&log_s, &log_f) {
        Some(fit) => {
            let exponent = fit.slope.clamp(0.0, 2.0);
            DfaResult {
                exponent,
                curve,
                r_squared: Some(fit.r_squared),
                classification: DfaClassification::from_exponent(exponent),
            }
        }
        None => {
            trace!(estimator = "dfa", len = signal.len(), "too few window sizes, using sentinel");
            DfaResult::sentinel(curve)
        }
    }
}
