//! Shared numeric utilities for the spectral and fractal analyzers

pub mod finite;
pub mod regression;
pub mod distance;

pub use finite::{finite_or, finite_or_zero, finite_sum, sanitize_samples};
pub use regression::{goodness_of_fit, linear_fit, LinearFit};
pub use distance::euclidean_distance;
