//! Fractal analyzer
//!
//! Runs the four dimension estimators over the same sample window and
//! combines the three geometric ones into a complexity assessment.

use super::box_counting::{self, BoxCountingResult};
use super::complexity::{assess_complexity, ComplexityAssessment};
use super::correlation::{self, CorrelationResult};
use super::dfa::{self, DfaResult};
use super::higuchi::{self, HiguchiResult};
use crate::error::{AnalysisResult, ConfigurationError};
use crate::numeric::sanitize_samples;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fractal analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    /// Smallest box size for box counting; doubled up to `max_box_size`
    pub min_box_size: usize,
    pub max_box_size: usize,

    /// Smallest correlation radius
    pub min_distance: f64,
    /// Largest correlation radius
    pub max_distance: f64,
    /// Number of log-spaced radii
    pub correlation_points: usize,

    /// Higuchi interval range
    pub min_k: usize,
    pub max_k: usize,

    /// DFA window size range
    pub min_window_size: usize,
    pub max_window_size: usize,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            min_box_size: 2,
            max_box_size: 64,
            min_distance: 0.01,
            max_distance: 1.0,
            correlation_points: 20,
            min_k: 1,
            max_k: 10,
            min_window_size: 4,
            max_window_size: 64,
        }
    }
}

/// Partial configuration; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfigUpdate {
    pub min_box_size: Option<usize>,
    pub max_box_size: Option<usize>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub correlation_points: Option<usize>,
    pub min_k: Option<usize>,
    pub max_k: Option<usize>,
    pub min_window_size: Option<usize>,
    pub max_window_size: Option<usize>,
}

fn check_range(
    min_name: &str,
    min: usize,
    min_floor: usize,
    max_name: &str,
    max: usize,
) -> AnalysisResult<()> {
    if min < min_floor {
        return Err(ConfigurationError::invalid(
            min_name,
            min as f64,
            &format!("at least {}", min_floor),
        ));
    }
    if max < min {
        return Err(ConfigurationError::invalid(
            max_name,
            max as f64,
            &format!("at least {} = {}", min_name, min),
        ));
    }
    Ok(())
}

impl FractalConfig {
    /// Return a new config with every `Some` field of `update` applied
    pub fn merge(&self, update: &FractalConfigUpdate) -> FractalConfig {
        FractalConfig {
            min_box_size: update.min_box_size.unwrap_or(self.min_box_size),
            max_box_size: update.max_box_size.unwrap_or(self.max_box_size),
            min_distance: update.min_distance.unwrap_or(self.min_distance),
            max_distance: update.max_distance.unwrap_or(self.max_distance),
            correlation_points: update.correlation_points.unwrap_or(self.correlation_points),
            min_k: update.min_k.unwrap_or(self.min_k),
            max_k: update.max_k.unwrap_or(self.max_k),
            min_window_size: update.min_window_size.unwrap_or(self.min_window_size),
            max_window_size: update.max_window_size.unwrap_or(self.max_window_size),
        }
    }

    /// Check structural validity
    pub fn validate(&self) -> AnalysisResult<()> {
        check_range("min_box_size", self.min_box_size, 1, "max_box_size", self.max_box_size)?;
        check_range("min_k", self.min_k, 1, "max_k", self.max_k)?;
        // Two-point windows detrend to zero residual
        check_range(
            "min_window_size",
            self.min_window_size,
            3,
            "max_window_size",
            self.max_window_size,
        )?;

        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(ConfigurationError::invalid(
                "min_distance",
                self.min_distance,
                "finite and > 0",
            ));
        }
        if !(self.max_distance.is_finite() && self.max_distance > self.min_distance) {
            return Err(ConfigurationError::invalid(
                "max_distance",
                self.max_distance,
                "finite and > min_distance",
            ));
        }
        if self.correlation_points < 2 {
            return Err(ConfigurationError::invalid(
                "correlation_points",
                self.correlation_points as f64,
                "at least 2",
            ));
        }
        Ok(())
    }
}

/// Complexity descriptors for one sample window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractalFeatures {
    pub box_counting: BoxCountingResult,
    pub correlation: CorrelationResult,
    pub higuchi: HiguchiResult,
    pub dfa: DfaResult,
    pub complexity: ComplexityAssessment,
}

/// Fractal analyzer
#[derive(Debug, Clone)]
pub struct FractalAnalyzer {
    config: FractalConfig,
}

impl FractalAnalyzer {
    /// Create new fractal analyzer
    pub fn new(config: FractalConfig) -> AnalysisResult<Self> {
        config.validate()?;
        debug!(?config, "fractal analyzer created");
        Ok(Self { config })
    }

    /// Run every estimator on one sample window
    ///
    /// Never fails: short or degenerate windows yield sentinel values.
    /// Correlation dimension is O(n²) in the window length.
    pub fn analyze(&self, signal: &[f64]) -> FractalFeatures {
        let (signal, replaced) = sanitize_samples(signal);
        if replaced > 0 {
            warn!(
                replaced,
                len = signal.len(),
                "non-finite samples coerced to zero before fractal analysis"
            );
        }

        let box_counting = box_counting::estimate(&signal, &self.config);
        let correlation = correlation::estimate(&signal, &self.config);
        let higuchi = higuchi::estimate(&signal, &self.config);
        let dfa = dfa::estimate(&signal, &self.config);
        let complexity = assess_complexity(
            box_counting.dimension,
            correlation.dimension,
            higuchi.dimension,
        );

        FractalFeatures {
            box_counting,
            correlation,
            higuchi,
            dfa,
            complexity,
        }
    }

    /// Update configuration; on error the analyzer is left untouched
    pub fn update_config(&mut self, update: &FractalConfigUpdate) -> AnalysisResult<()> {
        let config = self.config.merge(update);
        config.validate()?;
        debug!(?config, "fractal analyzer reconfigured");
        self.config = config;
        Ok(())
    }

    /// Get current configuration
    pub fn config(&self) -> &FractalConfig {
        &self.config
    }
}
