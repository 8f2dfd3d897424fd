//! Spectral analysis with a radix-2 FFT

pub mod windowing;
pub mod fft;
pub mod features;
pub mod analysis;

pub use windowing::{generate_window, generate_window_by_name, WindowCoefficients, WindowType};
pub use fft::{fft, power_spectrum, FftEngine};
pub use analysis::{SpectralAnalyzer, SpectralConfig, SpectralConfigUpdate, SpectralFeatures};
