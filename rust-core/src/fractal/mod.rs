//! Fractal-dimension estimators
//!
//! Four independent log-log regression estimators plus an aggregate
//! complexity assessment. None of them fail on data: short or degenerate
//! windows fall back to documented sentinel values.

pub mod box_counting;
pub mod correlation;
pub mod higuchi;
pub mod dfa;
pub mod complexity;
pub mod analysis;

use crate::numeric::{finite_or_zero, goodness_of_fit, linear_fit};
use serde::Serialize;

pub use box_counting::{box_counting_dimension, BoxCountingResult};
pub use correlation::{correlation_dimension, CorrelationResult};
pub use higuchi::{higuchi_dimension, HiguchiResult};
pub use dfa::{detrended_fluctuation, DfaClassification, DfaResult};
pub use complexity::{assess_complexity, ComplexityAssessment, ComplexityLevel, Consistency};
pub use analysis::{FractalAnalyzer, FractalConfig, FractalConfigUpdate, FractalFeatures};

/// Dimension reported by box-counting, correlation and Higuchi when the
/// window is too short or has no variation
pub const SENTINEL_DIMENSION: f64 = 1.0;

/// One point of an estimator's scaling curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalePoint {
    /// Scale parameter (box size, radius, interval or window size)
    pub scale: f64,
    /// Measurement at that scale (count, correlation, curve length or fluctuation)
    pub measure: f64,
}

/// Least-squares fit of a log-log relationship
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LogLogFit {
    pub slope: f64,
    pub r_squared: f64,
}

/// Fit `y` against `x` when both are already in log space
///
/// Returns `None` with fewer than two points.
pub(crate) fn fit_log_log(log_x: &[f64], log_y: &[f64]) -> Option<LogLogFit> {
    if log_x.len().min(log_y.len()) < 2 {
        return None;
    }

    let fit = linear_fit(log_x, log_y);
    Some(LogLogFit {
        slope: finite_or_zero(fit.slope),
        r_squared: goodness_of_fit(log_x, log_y, fit.slope),
    })
}

/// Range of the signal, or 0 for an empty one
pub(crate) fn signal_range(signal: &[f64]) -> (f64, f64) {
    if signal.is_empty() {
        return (0.0, 0.0);
    }
    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_log_log() {
        assert!(fit_log_log(&[1.0], &[2.0]).is_none());

        let fit = fit_log_log(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_signal_range() {
        assert_eq!(signal_range(&[]), (0.0, 0.0));
        assert_eq!(signal_range(&[3.0, -1.0, 2.0]), (-1.0, 3.0));
    }
}
