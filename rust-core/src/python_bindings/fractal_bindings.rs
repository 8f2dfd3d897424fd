//! Python bindings for fractal analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::PyReadonlyArray1;
use crate::fractal::{FractalAnalyzer, FractalConfig, FractalConfigUpdate, ScalePoint};
use super::config_err;

/// Fractal analyzer exposed to Python
#[pyclass(name = "FractalAnalyzer")]
pub struct PyFractalAnalyzer {
    analyzer: FractalAnalyzer,
}

fn curve_pairs(curve: &[ScalePoint]) -> Vec<(f64, f64)> {
    curve.iter().map(|p| (p.scale, p.measure)).collect()
}

fn estimate_dict<'py>(
    py: Python<'py>,
    key: &str,
    value: f64,
    curve: &[ScalePoint],
    r_squared: Option<f64>,
) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item(key, value)?;
    dict.set_item("curve", curve_pairs(curve))?;
    dict.set_item("r_squared", r_squared)?;
    Ok(dict)
}

#[pymethods]
impl PyFractalAnalyzer {
    /// Create a new fractal analyzer
    ///
    /// All arguments are optional and default to the library defaults.
    ///
    /// Raises:
    ///     ValueError: If the configuration is invalid
    #[new]
    #[pyo3(signature = (
        min_box_size=None, max_box_size=None,
        min_distance=None, max_distance=None, correlation_points=None,
        min_k=None, max_k=None,
        min_window_size=None, max_window_size=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        min_box_size: Option<usize>,
        max_box_size: Option<usize>,
        min_distance: Option<f64>,
        max_distance: Option<f64>,
        correlation_points: Option<usize>,
        min_k: Option<usize>,
        max_k: Option<usize>,
        min_window_size: Option<usize>,
        max_window_size: Option<usize>,
    ) -> PyResult<Self> {
        let update = FractalConfigUpdate {
            min_box_size,
            max_box_size,
            min_distance,
            max_distance,
            correlation_points,
            min_k,
            max_k,
            min_window_size,
            max_window_size,
        };
        let config = FractalConfig::default().merge(&update);

        Ok(Self {
            analyzer: FractalAnalyzer::new(config).map_err(config_err)?,
        })
    }

    /// Run every estimator on one sample window
    ///
    /// Returns:
    ///     Dict with box_counting, correlation, higuchi, dfa and complexity
    ///     entries
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyDict> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let features = self.analyzer.analyze(sig);

        let result = PyDict::new(py);

        let b = &features.box_counting;
        result.set_item(
            "box_counting",
            estimate_dict(py, "dimension", b.dimension, &b.curve, b.r_squared)?,
        )?;

        let c = &features.correlation;
        result.set_item(
            "correlation",
            estimate_dict(py, "dimension", c.dimension, &c.curve, c.r_squared)?,
        )?;

        let h = &features.higuchi;
        result.set_item(
            "higuchi",
            estimate_dict(py, "dimension", h.dimension, &h.curve, h.r_squared)?,
        )?;

        let d = &features.dfa;
        let dfa = estimate_dict(py, "exponent", d.exponent, &d.curve, d.r_squared)?;
        dfa.set_item("classification", d.classification.name())?;
        result.set_item("dfa", dfa)?;

        let complexity = PyDict::new(py);
        complexity.set_item("average_dimension", features.complexity.average_dimension)?;
        complexity.set_item("dimension_variance", features.complexity.dimension_variance)?;
        complexity.set_item("complexity", features.complexity.complexity.name())?;
        complexity.set_item("consistency", features.complexity.consistency.name())?;
        result.set_item("complexity", complexity)?;

        Ok(result)
    }

    /// Update configuration
    ///
    /// Only the arguments given are changed; the rest keep their current
    /// value.
    ///
    /// Raises:
    ///     ValueError: If the merged configuration is invalid; the analyzer
    ///         is left unchanged
    #[pyo3(signature = (
        min_box_size=None, max_box_size=None,
        min_distance=None, max_distance=None, correlation_points=None,
        min_k=None, max_k=None,
        min_window_size=None, max_window_size=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn update_config(
        &mut self,
        min_box_size: Option<usize>,
        max_box_size: Option<usize>,
        min_distance: Option<f64>,
        max_distance: Option<f64>,
        correlation_points: Option<usize>,
        min_k: Option<usize>,
        max_k: Option<usize>,
        min_window_size: Option<usize>,
        max_window_size: Option<usize>,
    ) -> PyResult<()> {
        let update = FractalConfigUpdate {
            min_box_size,
            max_box_size,
            min_distance,
            max_distance,
            correlation_points,
            min_k,
            max_k,
            min_window_size,
            max_window_size,
        };
        self.analyzer.update_config(&update).map_err(config_err)
    }

    /// Get current box size range as (min_box_size, max_box_size)
    fn get_box_size_range(&self) -> (usize, usize) {
        let config = self.analyzer.config();
        (config.min_box_size, config.max_box_size)
    }

    /// Get current DFA window size range as (min_window_size, max_window_size)
    fn get_window_size_range(&self) -> (usize, usize) {
        let config = self.analyzer.config();
        (config.min_window_size, config.max_window_size)
    }

    /// Get current Higuchi interval range as (min_k, max_k)
    fn get_k_range(&self) -> (usize, usize) {
        let config = self.analyzer.config();
        (config.min_k, config.max_k)
    }
}
