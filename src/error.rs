//! Crate-level error type.

use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::sample::SampleError;
use crate::sampling::SamplerError;
use thiserror::Error;

/// Any failure of a comparison run.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before any draw.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Digit source could not supply the pool.
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    /// Values do not fit their declared range.
    #[error(transparent)]
    Sample(#[from] SampleError),

    /// Sample could not be scored.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Report could not be encoded as TOML.
    #[error("failed to serialize report: {0}")]
    Report(#[from] toml::ser::Error),

    /// Report file could not be written.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
