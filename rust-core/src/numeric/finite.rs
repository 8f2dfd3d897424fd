//! Finite-or-default guards
//!
//! Every reduction in the crate funnels its inputs and outputs through these
//! helpers so NaN and infinity never reach a returned feature.

use std::borrow::Cow;

/// Return `value` if it is finite, otherwise `default`
#[inline]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// Return `value` if it is finite, otherwise 0
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    finite_or(value, 0.0)
}

/// Sum only the finite values of an iterator
pub fn finite_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| v.is_finite()).sum()
}

/// Replace non-finite samples with 0
///
/// # Returns
/// The cleaned window (borrowed when nothing needed replacing) and the number
/// of samples that were replaced
pub fn sanitize_samples(signal: &[f64]) -> (Cow<'_, [f64]>, usize) {
    let bad = signal.iter().filter(|s| !s.is_finite()).count();
    if bad == 0 {
        return (Cow::Borrowed(signal), 0);
    }

    let cleaned = signal.iter().map(|&s| finite_or_zero(s)).collect();
    (Cow::Owned(cleaned), bad)
}
