//! Tabular number generation.
//!
//! The tabular method does not compute numbers; it samples them from
//! pre-existing digit material. Tokens are read from a whitespace
//! separated text source, deduplicated, shuffled, and split across the
//! three width classes.

mod pool;
mod token;

pub use pool::{split_into_classes, DigitPoolSampler, SamplerError};
pub use token::DigitToken;
