//! Frequency statistics over a declared range.
//!
//! [`FrequencyStats`] holds what the coefficient is computed from.
//! [`Diagnostics`] holds descriptive figures reported next to it; they
//! never feed into the score.

use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// Histogram and chi-square statistic of one sample.
#[derive(Debug, Clone)]
pub struct FrequencyStats {
    /// Occurrences of each value, indexed by `value - low`.
    pub counts: Vec<u64>,
    /// Pearson chi-square statistic against a flat histogram.
    pub chi_squared: f64,
    /// Number of values analyzed.
    pub sample_size: usize,
}

/// Descriptive figures of one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Population variance of the values.
    pub variance: f64,
    /// Lag-1 autocorrelation. Depends on value order.
    pub autocorrelation: f64,
    /// Admissible values that never occurred.
    pub missing_values: usize,
}

impl Diagnostics {
    /// Computes the descriptive figures of `sample`.
    pub fn analyze(sample: &Sample, stats: &FrequencyStats) -> Self {
        let values = sample.values();
        Self {
            mean: compute_mean(values),
            variance: compute_variance(values),
            autocorrelation: compute_autocorrelation(values),
            missing_values: stats.missing_values(),
        }
    }
}

impl FrequencyStats {
    /// Builds the histogram and chi-square statistic for the sample.
    pub fn analyze(sample: &Sample) -> Self {
        let counts = Self::histogram(sample);
        let n = sample.len();

        Self {
            chi_squared: Self::compute_chi_squared(&counts, n),
            counts,
            sample_size: n,
        }
    }

    /// Number of buckets (distinct admissible values).
    pub fn buckets(&self) -> usize {
        self.counts.len()
    }

    /// Degrees of freedom of the chi-square statistic.
    pub fn degrees_of_freedom(&self) -> usize {
        self.buckets().saturating_sub(1)
    }

    /// Buckets that never occurred.
    pub fn missing_values(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    fn histogram(sample: &Sample) -> Vec<u64> {
        let mut counts = vec![0u64; sample.span() as usize];
        for &value in sample.values() {
            counts[(value - sample.low()) as usize] += 1;
        }
        counts
    }

    fn compute_chi_squared(counts: &[u64], n: usize) -> f64 {
        if n == 0 || counts.is_empty() {
            return 0.0;
        }

        let expected = n as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }
}

fn compute_mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn compute_variance(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = compute_mean(values);
    values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Measures correlation between consecutive values.
fn compute_autocorrelation(values: &[u64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean = compute_mean(values);
    let variance: f64 = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum();

    if variance == 0.0 {
        return 1.0; // All same value = perfect correlation
    }

    let covariance: f64 = values
        .windows(2)
        .map(|w| (w[0] as f64 - mean) * (w[1] as f64 - mean))
        .sum();

    covariance / variance
}
