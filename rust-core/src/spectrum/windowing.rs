//! Window functions for spectral analysis
//!
//! Applies a tapering envelope to a sample block before the FFT to reduce
//! spectral leakage. Coefficient vectors are immutable once generated and
//! shared by reference, so a reconfiguration swaps in a new vector instead of
//! rewriting the one an in-flight analysis is reading.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WindowType {
    /// Raised cosine falling to zero at both ends
    #[default]
    Hann,

    /// Raised cosine on a 0.08 pedestal
    Hamming,

    /// Three-term cosine sum; widest mainlobe, lowest sidelobes
    Blackman,

    /// All ones; also what unknown names resolve to
    Rectangular,
}

impl WindowType {
    /// Parse a window name, falling back to `Rectangular` for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hann" | "hanning" => WindowType::Hann,
            "hamming" => WindowType::Hamming,
            "blackman" => WindowType::Blackman,
            _ => WindowType::Rectangular,
        }
    }

    /// `[a0, a1, a2]` of the cosine-sum form
    fn cosine_terms(&self) -> [f64; 3] {
        match self {
            WindowType::Hann => [0.5, 0.5, 0.0],
            WindowType::Hamming => [0.54, 0.46, 0.0],
            WindowType::Blackman => [0.42, 0.5, 0.08],
            WindowType::Rectangular => [1.0, 0.0, 0.0],
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::Rectangular => "rectangular",
        }
    }
}

impl FromStr for WindowType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for WindowType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetric cosine-sum window of `length` coefficients
///
/// `w[n] = a0 - a1·cos(θn) + a2·cos(2θn)` with `θn = 2πn / (length - 1)`, so
/// both endpoints carry the same weight. Lengths 0 and 1 give `[]` and
/// `[1.0]`.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length <= 1 {
        return vec![1.0; length];
    }

    let [a0, a1, a2] = window_type.cosine_terms();
    let step = 2.0 * PI / (length - 1) as f64;

    (0..length)
        .map(|n| {
            let theta = step * n as f64;
            a0 - a1 * theta.cos() + a2 * (2.0 * theta).cos()
        })
        .collect()
}

/// Generate a window from its name; unknown names give an all-ones window
pub fn generate_window_by_name(name: &str, length: usize) -> Vec<f64> {
    generate_window(WindowType::from_name(name), length)
}

/// Immutable, shareable window coefficient vector
#[derive(Debug, Clone)]
pub struct WindowCoefficients {
    window_type: WindowType,
    coefficients: Arc<[f64]>,
}

impl WindowCoefficients {
    /// Generate coefficients for the given window
    pub fn new(window_type: WindowType, size: usize) -> Self {
        Self {
            window_type,
            coefficients: generate_window(window_type, size).into(),
        }
    }

    /// Apply window to signal
    ///
    /// Multiplies elementwise over `min(signal.len(), self.len())` samples;
    /// the result has that length.
    pub fn apply(&self, signal: &[f64]) -> Vec<f64> {
        signal
            .iter()
            .zip(self.coefficients.iter())
            .map(|(&s, &w)| s * w)
            .collect()
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coefficients
    }

    /// True if both handles point at the same generated vector
    pub fn shares_storage_with(&self, other: &WindowCoefficients) -> bool {
        Arc::ptr_eq(&self.coefficients, &other.coefficients)
    }
}
