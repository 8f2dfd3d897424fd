//! Signal Complexity - spectral and fractal descriptors for sample windows
//!
//! Converts a finite window of real-valued samples into deterministic
//! complexity descriptors: spectral shape statistics from a radix-2 FFT, and
//! four fractal-dimension estimates (box-counting, correlation, Higuchi,
//! detrended fluctuation). Analyzers never fail on data; only invalid
//! configuration is rejected.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod numeric;
pub mod spectrum;
pub mod fractal;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{AnalysisResult, ConfigurationError};
pub use spectrum::{SpectralAnalyzer, SpectralConfig, SpectralConfigUpdate, SpectralFeatures, WindowType};
pub use fractal::{FractalAnalyzer, FractalConfig, FractalConfigUpdate, FractalFeatures};
