//! Quality thresholds for scored samples.
//!
//! A sample below threshold is still a valid result; the violation is
//! reported next to it, never raised as a failure.

use super::coefficient::Coefficient;
use serde::{Deserialize, Serialize};

/// Minimum acceptable scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum uniformity coefficient.
    pub min_coefficient: f64,
    /// Minimum chi-square p-value.
    pub min_p_value: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_coefficient: 0.9,
            min_p_value: 0.01,
        }
    }
}

impl QualityThresholds {
    /// Stricter thresholds.
    pub fn conservative() -> Self {
        Self {
            min_coefficient: 0.98,
            min_p_value: 0.05,
        }
    }

    /// Thresholds that only flag grossly non-uniform output (for testing).
    pub fn permissive() -> Self {
        Self {
            min_coefficient: 0.5,
            min_p_value: 0.0,
        }
    }

    /// Checks a score against the thresholds.
    pub fn check(&self, coefficient: &Coefficient) -> Result<(), ThresholdViolation> {
        if coefficient.value < self.min_coefficient {
            return Err(ThresholdViolation::LowCoefficient {
                observed: coefficient.value,
                threshold: self.min_coefficient,
            });
        }

        if let Some(p_value) = coefficient.p_value {
            if p_value < self.min_p_value {
                return Err(ThresholdViolation::LowPValue {
                    observed: p_value,
                    threshold: self.min_p_value,
                });
            }
        }

        Ok(())
    }
}

/// Threshold violation types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ThresholdViolation {
    /// Coefficient under `min_coefficient`.
    #[error("coefficient {observed:.4} below threshold {threshold:.4}")]
    LowCoefficient {
        /// Measured coefficient.
        observed: f64,
        /// Required minimum.
        threshold: f64,
    },

    /// p-value under `min_p_value`.
    #[error("chi-square p-value {observed:.4} below threshold {threshold:.4}")]
    LowPValue {
        /// Measured p-value.
        observed: f64,
        /// Required minimum.
        threshold: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RandomnessCoefficient;
    use crate::sample::{Sample, WidthClass};

    fn score(values: Vec<u64>) -> Coefficient {
        let sample = Sample::for_class(values, WidthClass::OneDigit).unwrap();
        RandomnessCoefficient::new().score(&sample).unwrap()
    }

    #[test]
    fn test_uniform_passes() {
        let coeff = score((0..1000).map(|i| i % 10).collect());
        assert!(QualityThresholds::conservative().check(&coeff).is_ok());
    }

    #[test]
    fn test_constant_fails_coefficient() {
        let coeff = score(vec![3; 1000]);
        assert!(matches!(
            QualityThresholds::permissive().check(&coeff),
            Err(ThresholdViolation::LowCoefficient { .. })
        ));
    }

    #[test]
    fn test_slight_bias_fails_p_value_only() {
        // 0 appears twice as often as every other digit
        let mut values: Vec<u64> = (0..10_000).map(|i| i % 10).collect();
        values.extend(std::iter::repeat(0).take(1000));
        let coeff = score(values);

        let thresholds = QualityThresholds {
            min_coefficient: 0.9,
            min_p_value: 0.01,
        };
        assert!(coeff.value > 0.9);
        assert!(matches!(
            thresholds.check(&coeff),
            Err(ThresholdViolation::LowPValue { .. })
        ));
    }
}
