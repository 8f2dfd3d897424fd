//! Least-squares line fitting
//!
//! These never fail. Degenerate input yields a flat line, and the scaling
//! estimators built on top fall back to their sentinels.

/// Slope and intercept of a least-squares line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Fit `y = slope * x + intercept`
///
/// Only the first `min(x.len(), y.len())` pairs are used. Fewer than two
/// points or zero variance in `x` gives slope 0 and an intercept equal to the
/// mean of `y`.
pub fn linear_fit(x: &[f64], y: &[f64]) -> LinearFit {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = mean(x);
    let mean_y = mean(y);

    if n < 2 {
        return LinearFit { slope: 0.0, intercept: mean_y };
    }

    // Centered sums
    let (sxy, sxx) = x.iter().zip(y).fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
        let dx = xi - mean_x;
        (sxy + dx * (yi - mean_y), sxx + dx * dx)
    });

    if sxx == 0.0 || !sxx.is_finite() || !sxy.is_finite() {
        return LinearFit { slope: 0.0, intercept: mean_y };
    }

    let slope = sxy / sxx;
    LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Coefficient of determination for a line of known slope
///
/// The intercept is re-derived from the means of the (already
/// log-transformed) inputs. Returns 0 when `y` has no variance.
pub fn goodness_of_fit(x: &[f64], y: &[f64], slope: f64) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = mean(x);
    let mean_y = mean(y);
    let intercept = mean_y - slope * mean_x;

    let (ss_res, ss_tot) = x.iter().zip(y).fold((0.0, 0.0), |(res, tot), (&xi, &yi)| {
        let residual = yi - (slope * xi + intercept);
        let deviation = yi - mean_y;
        (res + residual * residual, tot + deviation * deviation)
    });

    if ss_tot == 0.0 {
        return 0.0;
    }

    super::finite_or_zero(1.0 - ss_res / ss_tot)
}
