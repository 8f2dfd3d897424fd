//! Spectral shape statistics
//!
//! Each reduction takes the analysed half of the power spectrum (bins
//! `0..N/2`) and the matching bin frequencies. Non-finite power values are
//! skipped at every accumulation, and every result passes through
//! [`finite_or_zero`].

use crate::numeric::{finite_or_zero, finite_sum};

/// Fraction of total energy that defines the rolloff frequency
pub const ROLLOFF_FRACTION: f64 = 0.85;

fn usable(power: f64) -> bool {
    power.is_finite() && power > 0.0
}

/// Power-weighted mean frequency
pub fn spectral_centroid(power: &[f64], frequencies: &[f64]) -> f64 {
    let (weighted, total) = power
        .iter()
        .zip(frequencies)
        .filter(|&(&p, _)| usable(p))
        .fold((0.0, 0.0), |(w, t), (&p, &f)| (w + f * p, t + p));

    if total == 0.0 {
        return 0.0;
    }
    finite_or_zero(weighted / total)
}

/// Power-weighted standard deviation of frequency around `centroid`
pub fn spectral_bandwidth(power: &[f64], frequencies: &[f64], centroid: f64) -> f64 {
    let (spread, total) = power
        .iter()
        .zip(frequencies)
        .filter(|&(&p, _)| usable(p))
        .fold((0.0, 0.0), |(s, t), (&p, &f)| {
            let deviation = f - centroid;
            (s + p * deviation * deviation, t + p)
        });

    if total == 0.0 {
        return 0.0;
    }
    finite_or_zero((spread / total).sqrt())
}

/// Lowest frequency at which cumulative power reaches 85% of the total
pub fn spectral_rolloff(power: &[f64], frequencies: &[f64]) -> f64 {
    let threshold = ROLLOFF_FRACTION * spectral_energy(power);
    let mut cumulative = 0.0;

    for (&p, &f) in power.iter().zip(frequencies) {
        if p.is_finite() {
            cumulative += p;
        }
        if cumulative >= threshold {
            return finite_or_zero(f);
        }
    }

    0.0
}

/// Sum of finite power values
pub fn spectral_energy(power: &[f64]) -> f64 {
    finite_or_zero(finite_sum(power.iter().copied()))
}

/// Shannon entropy (bits) of the normalized positive power distribution
pub fn spectral_entropy(power: &[f64]) -> f64 {
    let total: f64 = power.iter().copied().filter(|&p| usable(p)).sum();
    if total == 0.0 || !total.is_finite() {
        return 0.0;
    }

    let entropy: f64 = power
        .iter()
        .copied()
        .filter(|&p| usable(p))
        .map(|p| {
            let prob = p / total;
            if prob > 0.0 {
                -prob * prob.log2()
            } else {
                0.0
            }
        })
        .sum();

    finite_or_zero(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn freqs(n: usize, spacing: f64) -> Vec<f64> {
        (0..n).map(|k| k as f64 * spacing).collect()
    }

    #[test]
    fn test_single_peak() {
        let mut power = vec![0.0; 8];
        power[3] = 10.0;
        let f = freqs(8, 10.0);

        let centroid = spectral_centroid(&power, &f);
        assert_relative_eq!(centroid, 30.0);
        assert_eq!(spectral_bandwidth(&power, &f, centroid), 0.0);
        assert_relative_eq!(spectral_rolloff(&power, &f), 30.0);
        assert_relative_eq!(spectral_energy(&power), 10.0);
        assert_eq!(spectral_entropy(&power), 0.0);
    }

    #[test]
    fn test_uniform_power() {
        let power = vec![1.0; 4];
        let f = freqs(4, 1.0);

        let centroid = spectral_centroid(&power, &f);
        assert_relative_eq!(centroid, 1.5);
        assert_relative_eq!(spectral_bandwidth(&power, &f, centroid), 1.25f64.sqrt());
        // 85% of 4 is 3.4, reached at the fourth bin
        assert_relative_eq!(spectral_rolloff(&power, &f), 3.0);
        assert_relative_eq!(spectral_entropy(&power), 2.0);
    }

    #[test]
    fn test_zero_power_degenerates_to_zero() {
        let power = vec![0.0; 16];
        let f = freqs(16, 5.0);
        assert_eq!(spectral_centroid(&power, &f), 0.0);
        assert_eq!(spectral_bandwidth(&power, &f, 0.0), 0.0);
        assert_eq!(spectral_rolloff(&power, &f), 0.0);
        assert_eq!(spectral_energy(&power), 0.0);
        assert_eq!(spectral_entropy(&power), 0.0);
    }

    #[test]
    fn test_non_finite_bins_are_skipped() {
        let power = vec![f64::NAN, 2.0, f64::INFINITY, 2.0];
        let f = freqs(4, 1.0);

        assert_relative_eq!(spectral_centroid(&power, &f), 2.0);
        assert_relative_eq!(spectral_energy(&power), 4.0);
        assert_relative_eq!(spectral_entropy(&power), 1.0);
        assert_relative_eq!(spectral_rolloff(&power, &f), 3.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(spectral_centroid(&[], &[]), 0.0);
        assert_eq!(spectral_rolloff(&[], &[]), 0.0);
        assert_eq!(spectral_entropy(&[]), 0.0);
    }
}
