//! Core data types for the synthetic market simulator.
//!
//! - [`State`]: `(price, momentum, step_index)` at one time step
//! - [`Path`]: ordered, read-only state sequence of one run
//! - [`Metrics`]: risk/return figures derived from a path
//! - [`ClampStats`], [`ClampKind`]: guardrail audit records
//! - [`RandomDraw`]: `(index, value)` pair from a deterministic stream
//! - [`SimulationError`]: error type shared by all simulator crates

pub mod error;
pub mod metrics;
pub mod path;
pub mod state;

pub use error::{Result, SimulationError};
pub use metrics::{ClampKind, ClampStats, Metrics};
pub use path::Path;
pub use state::{RandomDraw, State};
