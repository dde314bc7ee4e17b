//! Linear congruential generator.
//!
//! Each draw advances the state by `state' = (a * state + b) mod c` and
//! maps the new state into the requested range with
//! `low + state' mod (high - low)`.
//!
//! # Quality
//!
//! When `c` is small compared to `high - low` the modulo collapses the
//! state space and the output is degenerate. That is a property of the
//! parameters, not an error: the generator keeps drawing and the
//! randomness coefficient reports the damage.

use super::GeneratorParams;
use crate::config::ConfigError;
use crate::sample::{Sample, WidthClass};

/// Stateful congruential generator.
///
/// Owned by a single batch; the state carries over between draws so a
/// batch walks the recurrence instead of repeating one transformation.
#[derive(Debug, Clone)]
pub struct CongruentialGenerator {
    params: GeneratorParams,
    state: u64,
    draws: u64,
}

impl CongruentialGenerator {
    /// Creates a generator at the parameters' initial state.
    ///
    /// Fails if any of `a`, `b`, `c` is below 1.
    pub fn new(params: GeneratorParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            state: params.seed,
            draws: 0,
        })
    }

    /// Advances the recurrence one step and returns the new state.
    pub fn advance(&mut self) -> u64 {
        let GeneratorParams {
            multiplier,
            increment,
            modulus,
            ..
        } = self.params;

        // u128 keeps `a * state + b` exact for any u64 inputs.
        let next = (multiplier as u128 * self.state as u128 + increment as u128) % modulus as u128;
        self.state = next as u64;
        self.draws += 1;
        self.state
    }

    /// Draws a value in `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if `high <= low`.
    pub fn draw(&mut self, low: u64, high: u64) -> u64 {
        assert!(high > low, "empty draw range [{low}, {high})");
        low + self.advance() % (high - low)
    }

    /// Draws `count` values of one width class as a sample.
    pub fn draw_sample(&mut self, class: WidthClass, count: usize) -> Sample {
        let values: Vec<u64> = (0..count)
            .map(|_| self.draw(class.low(), class.high()))
            .collect();

        tracing::debug!(
            class = %class,
            count,
            state = self.state,
            "Drew congruential sample"
        );

        Sample::from_class_unchecked(values, class)
    }

    /// Current state (the previous value of the recurrence).
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Total draws since construction.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Parameters the generator was built with.
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }
}
