//! High-level spectral analyzer
//!
//! Combines windowing, zero-padding and the radix-2 FFT with spectral shape
//! extraction over the non-mirrored half of the power spectrum.

use super::features::{
    spectral_bandwidth, spectral_centroid, spectral_energy, spectral_entropy, spectral_rolloff,
};
use super::fft::{power_spectrum, FftEngine};
use super::windowing::{WindowCoefficients, WindowType};
use crate::error::{validate_fft_size, AnalysisResult, ConfigurationError};
use crate::numeric::{finite_or_zero, sanitize_samples};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Spectral analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Number of window coefficients applied to the start of each signal
    pub window_size: usize,

    /// Window type; unrecognized names deserialize as rectangular
    pub window_type: WindowType,

    /// FFT size (must be a power of 2)
    pub fft_size: usize,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Frame overlap in [0, 1), used by [`SpectralAnalyzer::analyze_frames`]
    pub overlap: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            window_size: 128,
            window_type: WindowType::Hann,
            fft_size: 256,
            sample_rate: 1000.0,
            overlap: 0.5,
        }
    }
}

/// Partial configuration; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfigUpdate {
    pub window_size: Option<usize>,
    pub window_type: Option<WindowType>,
    pub fft_size: Option<usize>,
    pub sample_rate: Option<f64>,
    pub overlap: Option<f64>,
}

impl SpectralConfig {
    /// Return a new config with every `Some` field of `update` applied
    pub fn merge(&self, update: &SpectralConfigUpdate) -> SpectralConfig {
        SpectralConfig {
            window_size: update.window_size.unwrap_or(self.window_size),
            window_type: update.window_type.unwrap_or(self.window_type),
            fft_size: update.fft_size.unwrap_or(self.fft_size),
            sample_rate: update.sample_rate.unwrap_or(self.sample_rate),
            overlap: update.overlap.unwrap_or(self.overlap),
        }
    }

    /// Check structural validity
    pub fn validate(&self) -> AnalysisResult<()> {
        validate_fft_size(self.fft_size)?;

        if self.window_size == 0 {
            return Err(ConfigurationError::invalid(
                "window_size",
                0.0,
                "at least 1",
            ));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigurationError::invalid(
                "sample_rate",
                self.sample_rate,
                "finite and > 0",
            ));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(ConfigurationError::invalid(
                "overlap",
                self.overlap,
                "in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Spectral shape descriptors for one sample window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectralFeatures {
    /// Power-weighted mean frequency (Hz)
    pub centroid: f64,
    /// Power-weighted frequency spread around the centroid (Hz)
    pub bandwidth: f64,
    /// Frequency below which 85% of the energy lies (Hz)
    pub rolloff: f64,
    /// Total power over the analysed bins
    pub energy: f64,
    /// Shannon entropy of the normalized power distribution (bits)
    pub entropy: f64,
    /// All `fft_size` complex coefficients
    pub fft: Vec<Complex64>,
    /// |X[k]|² for all `fft_size` bins
    pub power_spectrum: Vec<f64>,
}

/// Spectral analyzer
///
/// Holds an immutable configuration snapshot. The window coefficients are
/// reference counted; `analyze` takes its own handle on entry so the vector
/// it reads cannot change underneath it.
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    config: SpectralConfig,
    window: WindowCoefficients,
    fft_engine: FftEngine,
}

impl SpectralAnalyzer {
    /// Create new spectral analyzer
    pub fn new(config: SpectralConfig) -> AnalysisResult<Self> {
        config.validate()?;

        let fft_engine = FftEngine::new(config.fft_size)?;
        let window = WindowCoefficients::new(config.window_type, config.window_size);

        debug!(
            fft_size = config.fft_size,
            window_type = %config.window_type,
            window_size = config.window_size,
            sample_rate = config.sample_rate,
            "spectral analyzer created"
        );

        Ok(Self {
            config,
            window,
            fft_engine,
        })
    }

    /// Analyze one sample window
    ///
    /// Never fails: empty, silent or non-finite input yields zeroed features.
    pub fn analyze(&self, signal: &[f64]) -> SpectralFeatures {
        let window = self.window.clone();

        let (signal, replaced) = sanitize_samples(signal);
        if replaced > 0 {
            warn!(
                replaced,
                len = signal.len(),
                "non-finite samples coerced to zero before spectral analysis"
            );
        }

        let windowed = window.apply(&signal);

        let fft: Vec<Complex64> = self
            .fft_engine
            .transform(&windowed)
            .into_iter()
            .map(|c| Complex64::new(finite_or_zero(c.re), finite_or_zero(c.im)))
            .collect();

        let power: Vec<f64> = power_spectrum(&fft)
            .into_iter()
            .map(finite_or_zero)
            .collect();

        // Bins above N/2 mirror the lower half for real input
        let half = &power[..self.fft_engine.num_bins()];
        let frequencies = self.frequency_bins_hz();

        let centroid = spectral_centroid(half, &frequencies);
        let bandwidth = spectral_bandwidth(half, &frequencies, centroid);

        SpectralFeatures {
            centroid,
            bandwidth,
            rolloff: spectral_rolloff(half, &frequencies),
            energy: spectral_energy(half),
            entropy: spectral_entropy(half),
            fft,
            power_spectrum: power,
        }
    }

    /// Analyze overlapping frames of a longer signal
    ///
    /// Frames are `window_size` samples long and advance by
    /// `window_size * (1 - overlap)` samples (at least one). A signal no
    /// longer than one frame is analysed as a single frame.
    pub fn analyze_frames(&self, signal: &[f64]) -> Vec<SpectralFeatures> {
        let frame_len = self.config.window_size;
        if signal.len() <= frame_len {
            return vec![self.analyze(signal)];
        }

        let hop = self.hop_size();
        (0..=signal.len() - frame_len)
            .step_by(hop)
            .map(|start| self.analyze(&signal[start..start + frame_len]))
            .collect()
    }

    /// Samples between consecutive frame starts in [`Self::analyze_frames`]
    pub fn hop_size(&self) -> usize {
        let hop = (self.config.window_size as f64 * (1.0 - self.config.overlap)).round();
        (hop as usize).max(1)
    }

    /// Frequencies in Hz of the analysed bins (first fft_size/2)
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.fft_engine.num_bins())
            .map(|bin| self.fft_engine.bin_frequency(bin, self.config.sample_rate))
            .collect()
    }

    /// Update configuration
    ///
    /// The merged config is validated before anything is replaced; on error
    /// the analyzer is left untouched. Window coefficients are regenerated
    /// only when the window type or size changes.
    pub fn update_config(&mut self, update: &SpectralConfigUpdate) -> AnalysisResult<()> {
        let config = self.config.merge(update);
        config.validate()?;

        let needs_new_window = config.window_type != self.config.window_type
            || config.window_size != self.config.window_size;
        let needs_new_fft = config.fft_size != self.config.fft_size;

        if needs_new_fft {
            self.fft_engine = FftEngine::new(config.fft_size)?;
        }
        if needs_new_window {
            self.window = WindowCoefficients::new(config.window_type, config.window_size);
        }

        debug!(
            fft_size = config.fft_size,
            window_type = %config.window_type,
            window_size = config.window_size,
            regenerated_window = needs_new_window,
            rebuilt_fft = needs_new_fft,
            "spectral analyzer reconfigured"
        );

        self.config = config;
        Ok(())
    }

    /// Get current configuration
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Get current window coefficients
    pub fn window(&self) -> &WindowCoefficients {
        &self.window
    }

    /// Get number of analysed frequency bins
    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }
}
