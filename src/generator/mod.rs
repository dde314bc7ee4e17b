//! Algorithmic number generation.
//!
//! This module provides the linear congruential generator used by the
//! algorithmic method. The generator state is owned by exactly one
//! batch and threaded through successive draws.

mod congruential;
mod params;

pub use congruential::CongruentialGenerator;
pub use params::GeneratorParams;
