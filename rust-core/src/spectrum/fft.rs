//! Iterative radix-2 Cooley-Tukey FFT
//!
//! Sizes are restricted to powers of two. The bit-reversal permutation is
//! computed once per engine; the twiddle factor is computed once per stage and
//! advanced by complex multiplication across butterfly positions.

use crate::error::{validate_fft_size, AnalysisResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// FFT engine for a fixed power-of-two size
#[derive(Debug, Clone)]
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Source index for every output slot of the bit-reversal permutation
    bit_reversal: Vec<usize>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size, must be a power of two
    pub fn new(fft_size: usize) -> AnalysisResult<Self> {
        validate_fft_size(fft_size)?;

        Ok(Self {
            fft_size,
            bit_reversal: bit_reversal_permutation(fft_size),
        })
    }

    /// Transform a real signal
    ///
    /// The signal is truncated to `fft_size` samples or zero-padded up to it.
    ///
    /// # Returns
    /// All `fft_size` complex coefficients
    pub fn transform(&self, signal: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = self
            .bit_reversal
            .iter()
            .map(|&src| Complex64::new(signal.get(src).copied().unwrap_or(0.0), 0.0))
            .collect();

        butterflies(&mut buffer);
        buffer
    }

    /// Transform a complex sequence of exactly `fft_size` values
    fn transform_complex(&self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = self.bit_reversal.iter().map(|&src| input[src]).collect();
        butterflies(&mut buffer);
        buffer
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of non-mirrored bins used for feature extraction (fft_size/2)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Frequency of a bin in Hz: `bin * sample_rate / fft_size`
    pub fn bin_frequency(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}

/// Forward FFT of a complex sequence whose length is a power of two
pub fn fft(input: &[Complex64]) -> AnalysisResult<Vec<Complex64>> {
    let engine = FftEngine::new(input.len())?;
    Ok(engine.transform_complex(input))
}

/// Squared magnitude of every coefficient
pub fn power_spectrum(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm_sqr()).collect()
}

fn bit_reversal_permutation(n: usize) -> Vec<usize> {
    let bits = n.trailing_zeros();
    if bits == 0 {
        return vec![0; n];
    }
    (0..n)
        .map(|i| i.reverse_bits() >> (usize::BITS - bits))
        .collect()
}

/// In-place butterflies over a bit-reversed buffer
fn butterflies(buffer: &mut [Complex64]) {
    let n = buffer.len();
    let mut size = 2;

    while size <= n {
        let half = size / 2;
        let step = Complex64::from_polar(1.0, -2.0 * PI / size as f64);

        for start in (0..n).step_by(size) {
            let mut w = Complex64::new(1.0, 0.0);
            for j in 0..half {
                let even = buffer[start + j];
                let odd = w * buffer[start + j + half];
                buffer[start + j] = even + odd;
                buffer[start + j + half] = even - odd;
                w *= step;
            }
        }

        size *= 2;
    }
}
