//! The randomness coefficient.
//!
//! With `k` buckets (one per admissible value), `n` values and expected
//! count `E = n / k`, the Pearson statistic is
//! `chi2 = Σ (O_i - E)² / E`. It is zero for a perfectly flat histogram
//! and reaches its maximum `n · (k - 1)` when every value is identical.
//! The coefficient rescales it onto `[0, 1]`:
//!
//! ```text
//! coefficient = 1 - chi2 / (n · (k - 1))
//! ```
//!
//! so 1 means perfectly uniform and 0 means constant. A single-bucket
//! range scores 1. The statistic only looks at the histogram, so the
//! score is invariant under any permutation of the sample.

use super::statistics::{Diagnostics, FrequencyStats};
use crate::sample::Sample;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The sample holds no values.
    #[error("cannot score an empty sample")]
    EmptySample,
}

/// Quality score of one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Uniformity coefficient in `[0, 1]`.
    pub value: f64,
    /// Pearson chi-square statistic.
    pub chi_squared: f64,
    /// Degrees of freedom (`buckets - 1`).
    pub degrees_of_freedom: usize,
    /// Upper-tail probability of `chi_squared`, when `degrees_of_freedom >= 1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Number of values scored.
    pub sample_size: usize,
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

/// Scores samples against a uniform distribution over their range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomnessCoefficient;

impl RandomnessCoefficient {
    /// Creates the scorer.
    pub fn new() -> Self {
        Self
    }

    /// Scores one non-empty sample.
    pub fn score(&self, sample: &Sample) -> Result<Coefficient, AnalysisError> {
        let stats = Self::analyze(sample)?;
        Ok(Self::from_stats(&stats))
    }

    /// Scores one non-empty sample and computes its [`Diagnostics`].
    pub fn score_with_diagnostics(
        &self,
        sample: &Sample,
    ) -> Result<(Coefficient, Diagnostics), AnalysisError> {
        let stats = Self::analyze(sample)?;
        let coefficient = Self::from_stats(&stats);
        let diagnostics = Diagnostics::analyze(sample, &stats);

        tracing::trace!(
            mean = diagnostics.mean,
            autocorrelation = diagnostics.autocorrelation,
            missing = diagnostics.missing_values,
            "Sample diagnostics"
        );

        Ok((coefficient, diagnostics))
    }

    fn analyze(sample: &Sample) -> Result<FrequencyStats, AnalysisError> {
        if sample.is_empty() {
            return Err(AnalysisError::EmptySample);
        }

        let stats = FrequencyStats::analyze(sample);

        tracing::trace!(
            low = sample.low(),
            high = sample.high(),
            n = stats.sample_size,
            chi_squared = stats.chi_squared,
            "Scored sample"
        );

        Ok(stats)
    }

    /// Builds the coefficient from precomputed statistics.
    pub fn from_stats(stats: &FrequencyStats) -> Coefficient {
        let n = stats.sample_size as f64;
        let dof = stats.degrees_of_freedom();

        let value = if dof == 0 || stats.sample_size == 0 {
            1.0
        } else {
            (1.0 - stats.chi_squared / (n * dof as f64)).clamp(0.0, 1.0)
        };

        let p_value = if dof > 0 {
            ChiSquared::new(dof as f64)
                .ok()
                .map(|dist| dist.sf(stats.chi_squared))
        } else {
            None
        };

        Coefficient {
            value,
            chi_squared: stats.chi_squared,
            degrees_of_freedom: dof,
            p_value,
            sample_size: stats.sample_size,
        }
    }
}
