//! Configuration errors
//!
//! Analyzers never fail because of the samples they are handed. The only
//! failure mode is a structurally invalid configuration, which is rejected
//! eagerly when an analyzer or FFT engine is built or reconfigured.

use thiserror::Error;

/// Structurally invalid analyzer configuration
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// FFT size is zero or not a power of two.
    #[error("FFT size must be a power of two, got {size}")]
    NonPowerOfTwoFftSize {
        /// Offending size
        size: usize,
    },

    /// Any other field outside its valid domain.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Field name
        parameter: String,
        /// Value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid(parameter: &str, value: f64, constraint: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }
}

/// Result alias used by every fallible constructor in the crate
pub type AnalysisResult<T> = Result<T, ConfigurationError>;

/// Reject FFT sizes the radix-2 engine cannot handle
pub fn validate_fft_size(size: usize) -> AnalysisResult<()> {
    if size.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigurationError::NonPowerOfTwoFftSize { size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_size_validation() {
        assert!(validate_fft_size(1).is_ok());
        assert!(validate_fft_size(256).is_ok());
        assert_eq!(
            validate_fft_size(0),
            Err(ConfigurationError::NonPowerOfTwoFftSize { size: 0 })
        );
        assert!(validate_fft_size(100).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ConfigurationError::invalid("min_k", 0.0, "at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: min_k = 0, expected at least 1"
        );
    }
}
