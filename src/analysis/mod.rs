//! Randomness scoring.
//!
//! This module measures how uniformly a sample's values cover their
//! declared range. The coefficient depends only on the multiset of
//! values, so the tabular and algorithmic methods are scored on equal
//! footing. These are sanity checks, not proofs of randomness.

mod coefficient;
mod statistics;
mod threshold;

pub use coefficient::{AnalysisError, Coefficient, RandomnessCoefficient};
pub use statistics::{Diagnostics, FrequencyStats};
pub use threshold::{QualityThresholds, ThresholdViolation};
