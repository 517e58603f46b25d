//! Path generation.
//!
//! Each step of a path is a strict chain:
//!
//! 1. Draw one shock from the path's [`DeterministicStream`](crate::rng::DeterministicStream)
//! 2. Propose State(t+1) via [`PriceDynamics`](crate::dynamics::PriceDynamics)
//! 3. Clamp via [`GuardrailEnforcer`](crate::dynamics::GuardrailEnforcer)
//! 4. Append the accepted state
//!
//! Exactly one shock is drawn per step, so stream position equals step index.

pub mod generator;

pub use generator::{CompletedPath, PathGenerator, PathStatus};
