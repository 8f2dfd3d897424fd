//! Aggregate complexity assessment
//!
//! Averages the box-counting, correlation and Higuchi dimensions. The DFA
//! exponent measures persistence rather than geometric dimension and is kept
//! out of the average.

use crate::numeric::finite_or_zero;
use serde::Serialize;

/// Complexity level from the average dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    /// average ≤ 1.2
    Low,
    /// 1.2 < average ≤ 1.5
    Medium,
    /// average > 1.5
    High,
}

impl ComplexityLevel {
    pub fn from_average(average: f64) -> Self {
        if average <= 1.2 {
            ComplexityLevel::Low
        } else if average <= 1.5 {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::High
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }
}

/// Agreement between estimators: low variance means high consistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    /// variance < 0.1
    High,
    /// 0.1 ≤ variance < 0.3
    Medium,
    /// variance ≥ 0.3
    Low,
}

impl Consistency {
    pub fn from_variance(variance: f64) -> Self {
        if variance < 0.1 {
            Consistency::High
        } else if variance < 0.3 {
            Consistency::Medium
        } else {
            Consistency::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Consistency::High => "high",
            Consistency::Medium => "medium",
            Consistency::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityAssessment {
    pub average_dimension: f64,
    /// Population variance of the three dimensions
    pub dimension_variance: f64,
    pub complexity: ComplexityLevel,
    pub consistency: Consistency,
}

/// Combine the three geometric dimension estimates
pub fn assess_complexity(box_counting: f64, correlation: f64, higuchi: f64) -> ComplexityAssessment {
    let dimensions = [box_counting, correlation, higuchi];
    let average = finite_or_zero(dimensions.iter().sum::<f64>() / 3.0);
    let variance = finite_or_zero(
        dimensions
            .iter()
            .map(|d| (d - average) * (d - average))
            .sum::<f64>()
            / 3.0,
    );

    ComplexityAssessment {
        average_dimension: average,
        dimension_variance: variance,
        complexity: ComplexityLevel::from_average(average),
        consistency: Consistency::from_variance(variance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinels() {
        let assessment = assess_complexity(1.0, 1.0, 1.0);
        assert_eq!(assessment.average_dimension, 1.0);
        assert_eq!(assessment.dimension_variance, 0.0);
        assert_eq!(assessment.complexity, ComplexityLevel::Low);
        assert_eq!(assessment.consistency, Consistency::High);
    }

    #[test]
    fn test_spread_estimates() {
        let assessment = assess_complexity(1.0, 1.4, 1.9);
        assert!((assessment.average_dimension - 4.3 / 3.0).abs() < 1e-12);
        assert!((assessment.dimension_variance - 0.122 / 0.9).abs() < 1e-9);
        assert_eq!(assessment.complexity, ComplexityLevel::Medium);
        assert_eq!(assessment.consistency, Consistency::Medium);

        let wild = assess_complexity(0.0, 1.8, 2.0);
        assert_eq!(wild.complexity, ComplexityLevel::Medium);
        assert_eq!(wild.consistency, Consistency::Low);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(ComplexityLevel::from_average(1.2), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::from_average(1.5), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::from_average(1.51), ComplexityLevel::High);
        assert_eq!(Consistency::from_variance(0.1), Consistency::Medium);
        assert_eq!(Consistency::from_variance(0.3), Consistency::Low);
    }
}
