//! Run configuration.
//!
//! A run is configured either from raw text fields (the way a form
//! supplies them), from a TOML file, or programmatically. Every path
//! ends in [`RunConfig::validate`], which rejects a configuration before
//! any number is generated.

use crate::analysis::QualityThresholds;
use crate::generator::GeneratorParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest batch size a run accepts.
pub const MIN_COUNT: usize = 10;

/// Largest batch size a run accepts (three classes must fit in a `usize`).
pub const MAX_COUNT: usize = usize::MAX / 3;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A generator parameter is below 1.
    #[error("parameter {field} must be at least 1, got {value}")]
    NonPositive {
        /// Parameter name (`a`, `b` or `c`).
        field: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// Batch size below [`MIN_COUNT`].
    #[error("count must be at least {min}, got {count}")]
    CountTooSmall {
        /// Rejected count.
        count: i64,
        /// Smallest accepted count.
        min: usize,
    },
    /// Batch size above [`MAX_COUNT`].
    #[error("count must be at most {max}, got {count}")]
    CountTooLarge {
        /// Rejected count.
        count: u64,
        /// Largest accepted count.
        max: usize,
    },
    /// A text field is not an integer.
    #[error("field {field} is not an integer: {value:?}")]
    Unparsable {
        /// Field name.
        field: &'static str,
        /// Text as entered.
        value: String,
    },
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The config file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Everything one comparison run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Numbers per width class.
    pub count: usize,
    /// Whitespace-separated digit source for the tabular method.
    pub source_path: PathBuf,
    /// Seed for shuffling the digit pool; OS entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,
    /// Congruential generator parameters.
    pub generator: GeneratorParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: 10000,
            source_path: PathBuf::from("digits.txt"),
            shuffle_seed: None,
            generator: GeneratorParams::default(),
        }
    }
}

impl RunConfig {
    /// Creates a configuration with the given count and generator.
    pub fn new(count: usize, generator: GeneratorParams) -> Self {
        Self {
            count,
            generator,
            ..Default::default()
        }
    }

    /// Returns a copy reading digits from `path`.
    pub fn with_source(self, path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: path.into(),
            ..self
        }
    }

    /// Returns a copy with a fixed shuffle seed.
    pub fn with_shuffle_seed(self, seed: u64) -> Self {
        Self {
            shuffle_seed: Some(seed),
            ..self
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        if self.count < MIN_COUNT {
            return Err(ConfigError::CountTooSmall {
                count: self.count as i64,
                min: MIN_COUNT,
            });
        }
        if self.count > MAX_COUNT {
            return Err(ConfigError::CountTooLarge {
                count: self.count as u64,
                max: MAX_COUNT,
            });
        }
        Ok(())
    }

    /// Distinct tokens the tabular method needs (one third per class).
    ///
    /// Saturates for counts that [`validate`](Self::validate) rejects.
    pub fn required_tokens(&self) -> usize {
        self.count.saturating_mul(3)
    }
}

/// Raw text of the user-editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFields {
    /// Numbers per width class.
    pub count: String,
    /// Multiplier.
    pub a: String,
    /// Increment.
    pub b: String,
    /// Modulus.
    pub c: String,
    /// Digit source path.
    pub source_path: String,
}

impl Default for ConfigFields {
    fn default() -> Self {
        Self::from(&RunConfig::default())
    }
}

impl From<&RunConfig> for ConfigFields {
    fn from(config: &RunConfig) -> Self {
        Self {
            count: config.count.to_string(),
            a: config.generator.multiplier.to_string(),
            b: config.generator.increment.to_string(),
            c: config.generator.modulus.to_string(),
            source_path: config.source_path.display().to_string(),
        }
    }
}

impl ConfigFields {
    /// Parses and validates the fields.
    ///
    /// Values are read as signed integers so that `"0"` or `"-5"` are
    /// reported as out of range rather than unparsable.
    pub fn parse(&self) -> Result<RunConfig, ConfigError> {
        let count = parse_field("count", &self.count)?;
        let a = parse_field("a", &self.a)?;
        let b = parse_field("b", &self.b)?;
        let c = parse_field("c", &self.c)?;

        for (field, value) in [("a", a), ("b", b), ("c", c)] {
            if value < 1 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if count < MIN_COUNT as i64 {
            return Err(ConfigError::CountTooSmall {
                count,
                min: MIN_COUNT,
            });
        }

        let count = usize::try_from(count).map_err(|_| ConfigError::CountTooLarge {
            count: count as u64,
            max: MAX_COUNT,
        })?;

        let config = RunConfig {
            count,
            source_path: PathBuf::from(self.source_path.trim()),
            generator: GeneratorParams::new(a as u64, b as u64, c as u64),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<i64, ConfigError> {
    text.trim().parse().map_err(|_| ConfigError::Unparsable {
        field,
        value: text.to_owned(),
    })
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// The `[run]` section.
    #[serde(default)]
    pub run: RunConfig,
    /// The `[thresholds]` section.
    #[serde(default)]
    pub thresholds: QualityThresholds,
}

impl FileConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.run.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_toml(content)?;
        config.run.validate()?;
        Ok(config)
    }

    /// Loads a TOML file without validating its values.
    ///
    /// For callers that override fields before validating.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parses TOML text without validating its values.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
