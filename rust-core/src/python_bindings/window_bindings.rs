//! Python bindings for window generation

use pyo3::prelude::*;
use numpy::PyArray1;
use crate::spectrum::windowing::generate_window_by_name;

/// Generate window coefficients
///
/// Args:
///     name: "hann", "hamming", "blackman" or "rectangular"; anything else
///         gives a rectangular window
///     size: Number of coefficients
///
/// Returns:
///     Coefficients as numpy array
#[pyfunction]
pub fn generate_window<'py>(py: Python<'py>, name: &str, size: usize) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, generate_window_by_name(name, size))
}
