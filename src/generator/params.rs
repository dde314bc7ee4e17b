//! Congruential generator parameters.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Parameters of the recurrence `state' = (a * state + b) mod c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// Multiplier `a`.
    pub multiplier: u64,
    /// Increment `b`.
    pub increment: u64,
    /// Modulus `c`.
    pub modulus: u64,
    /// Initial state.
    pub seed: u64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            multiplier: 36261,
            increment: 66037,
            modulus: 312500,
            seed: 1,
        }
    }
}

impl GeneratorParams {
    /// Creates parameters with the default seed.
    pub fn new(multiplier: u64, increment: u64, modulus: u64) -> Self {
        Self {
            multiplier,
            increment,
            modulus,
            ..Default::default()
        }
    }

    /// Returns a copy with a different initial state.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Rejects any parameter below 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("a", self.multiplier),
            ("b", self.increment),
            ("c", self.modulus),
        ] {
            if value < 1 {
                return Err(ConfigError::NonPositive {
                    field: name,
                    value: value as i64,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(GeneratorParams::default().validate().is_ok());
    }

    #[test]
    fn test_zero_params_rejected() {
        for params in [
            GeneratorParams::new(0, 1, 1),
            GeneratorParams::new(1, 0, 1),
            GeneratorParams::new(1, 1, 0),
        ] {
            assert!(matches!(
                params.validate(),
                Err(ConfigError::NonPositive { value: 0, .. })
            ));
        }
    }

    #[test]
    fn test_with_seed_keeps_coefficients() {
        let params = GeneratorParams::new(5, 7, 11).with_seed(3);
        assert_eq!(params.multiplier, 5);
        assert_eq!(params.increment, 7);
        assert_eq!(params.modulus, 11);
        assert_eq!(params.seed, 3);
    }
}
