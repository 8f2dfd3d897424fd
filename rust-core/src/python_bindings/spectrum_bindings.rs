//! Python bindings for spectral analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::PyReadonlyArray1;
use crate::spectrum::{SpectralAnalyzer, SpectralConfig, SpectralConfigUpdate, SpectralFeatures, WindowType};
use super::config_err;

/// Spectral analyzer exposed to Python
#[pyclass(name = "SpectralAnalyzer")]
pub struct PySpectralAnalyzer {
    analyzer: SpectralAnalyzer,
}

fn features_to_dict<'py>(py: Python<'py>, features: &SpectralFeatures) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("centroid", features.centroid)?;
    dict.set_item("bandwidth", features.bandwidth)?;
    dict.set_item("rolloff", features.rolloff)?;
    dict.set_item("energy", features.energy)?;
    dict.set_item("entropy", features.entropy)?;
    dict.set_item("fft_real", features.fft.iter().map(|c| c.re).collect::<Vec<f64>>())?;
    dict.set_item("fft_imag", features.fft.iter().map(|c| c.im).collect::<Vec<f64>>())?;
    dict.set_item("power_spectrum", features.power_spectrum.clone())?;
    Ok(dict)
}

#[pymethods]
impl PySpectralAnalyzer {
    /// Create a new spectral analyzer
    ///
    /// Args:
    ///     window_size: Number of window coefficients
    ///     window_type: Window name; unknown names fall back to rectangular
    ///     fft_size: FFT size (must be a power of 2)
    ///     sample_rate: Sample rate in Hz
    ///     overlap: Frame overlap for analyze_frames, in [0, 1)
    ///
    /// Raises:
    ///     ValueError: If the configuration is invalid
    #[new]
    #[pyo3(signature = (window_size=128, window_type="hann", fft_size=256, sample_rate=1000.0, overlap=0.5))]
    fn new(
        window_size: usize,
        window_type: &str,
        fft_size: usize,
        sample_rate: f64,
        overlap: f64,
    ) -> PyResult<Self> {
        let config = SpectralConfig {
            window_size,
            window_type: WindowType::from_name(window_type),
            fft_size,
            sample_rate,
            overlap,
        };

        Ok(Self {
            analyzer: SpectralAnalyzer::new(config).map_err(config_err)?,
        })
    }

    /// Analyze one sample window
    ///
    /// Returns:
    ///     Dict with centroid, bandwidth, rolloff, energy, entropy,
    ///     fft_real, fft_imag and power_spectrum
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyDict> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let features = self.analyzer.analyze(sig);
        features_to_dict(py, &features)
    }

    /// Analyze overlapping frames of a longer signal
    ///
    /// Returns:
    ///     List of feature dicts, one per frame
    fn analyze_frames<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<Vec<&'py PyDict>> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.analyzer
            .analyze_frames(sig)
            .iter()
            .map(|features| features_to_dict(py, features))
            .collect()
    }

    /// Get frequency of each analysed bin in Hz
    fn frequency_bins_hz(&self) -> Vec<f64> {
        self.analyzer.frequency_bins_hz()
    }

    /// Update configuration
    ///
    /// Args:
    ///     window_size: New window size
    ///     window_type: New window name
    ///     fft_size: New FFT size
    ///     sample_rate: New sample rate
    ///     overlap: New frame overlap
    #[pyo3(signature = (window_size=None, window_type=None, fft_size=None, sample_rate=None, overlap=None))]
    fn update_config(
        &mut self,
        window_size: Option<usize>,
        window_type: Option<&str>,
        fft_size: Option<usize>,
        sample_rate: Option<f64>,
        overlap: Option<f64>,
    ) -> PyResult<()> {
        let update = SpectralConfigUpdate {
            window_size,
            window_type: window_type.map(WindowType::from_name),
            fft_size,
            sample_rate,
            overlap,
        };
        self.analyzer.update_config(&update).map_err(config_err)
    }

    /// Get current FFT size
    fn get_fft_size(&self) -> usize {
        self.analyzer.config().fft_size
    }

    /// Get current sample rate
    fn get_sample_rate(&self) -> f64 {
        self.analyzer.config().sample_rate
    }

    /// Get current window type name
    fn get_window_type(&self) -> &'static str {
        self.analyzer.config().window_type.name()
    }
}
