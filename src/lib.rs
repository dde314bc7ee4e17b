//! Digit Randomness Library
//!
//! Compares two ways of producing pseudo-random digit sequences and
//! scores each with a uniformity coefficient:
//!
//! - the **tabular** method samples distinct tokens from pre-existing
//!   digit material (a whitespace-separated text file);
//! - the **algorithmic** method draws from a linear congruential
//!   generator `state' = (a * state + b) mod c`.
//!
//! # Architecture
//!
//! ```text
//! config ──► generator ─┐
//!        └─► sampling  ─┴─► sample ──► analysis ──► experiment report
//! ```
//!
//! The three core components are independent: the generator owns its
//! state for one batch, the sampler owns its pool, and the coefficient
//! is a pure function of a sample's histogram.
//!
//! # Example
//!
//! ```
//! use digit_randomness::{
//!     analysis::RandomnessCoefficient,
//!     generator::{CongruentialGenerator, GeneratorParams},
//!     sample::WidthClass,
//! };
//!
//! let mut generator = CongruentialGenerator::new(GeneratorParams::new(36261, 66037, 312500)).unwrap();
//! let sample = generator.draw_sample(WidthClass::TwoDigit, 1000);
//!
//! let coefficient = RandomnessCoefficient::new().score(&sample).unwrap();
//! assert!((0.0..=1.0).contains(&coefficient.value));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod sample;
pub mod sampling;

// Re-export commonly used types at crate root
pub use analysis::{Coefficient, Diagnostics, QualityThresholds, RandomnessCoefficient};
pub use config::{ConfigError, ConfigFields, FileConfig, RunConfig};
pub use error::{Error, Result};
pub use experiment::{Experiment, Method, Report};
pub use generator::{CongruentialGenerator, GeneratorParams};
pub use sample::{Sample, WidthClass};
pub use sampling::{DigitPoolSampler, DigitToken, SamplerError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
