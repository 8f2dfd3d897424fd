//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use crate::error::ConfigurationError;

mod window_bindings;
mod spectrum_bindings;
mod fractal_bindings;

pub(crate) fn config_err(err: ConfigurationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python module definition
#[pymodule]
fn signal_complexity(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectralAnalyzer>()?;
    m.add_class::<fractal_bindings::PyFractalAnalyzer>()?;
    m.add_function(wrap_pyfunction!(window_bindings::generate_window, m)?)?;

    Ok(())
}
