//! # synth_core: Data Model for the Synthetic Market Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! synth_core is the bottom layer of the simulator workspace, providing:
//! - Validated, immutable simulation parameters (`config`)
//! - Per-step state, paths and random draw records (`types`)
//! - Risk metrics and guardrail audit counters (`types::metrics`)
//! - The shared error type `SimulationError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other synth_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use synth_core::config::SimulationConfig;
//! use synth_core::types::{SimulationError, State};
//!
//! let config = SimulationConfig::builder()
//!     .seed(42)
//!     .num_steps(252)
//!     .noise_scale(0.5)
//!     .build()
//!     .unwrap();
//!
//! let s0 = State::initial(config.initial_price());
//! assert_eq!(s0.step_index, 0);
//!
//! // Invalid parameters never produce a configuration
//! let err = SimulationConfig::builder()
//!     .num_steps(5)
//!     .momentum_damping(1.5)
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, SimulationError::ConfigValidation { field: "momentum_damping", .. }));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for configuration, paths and metrics

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod types;

pub use config::{SimulationConfig, SimulationConfigBuilder, SimulationParams};
pub use types::{
    ClampKind, ClampStats, Metrics, Path, RandomDraw, Result, SimulationError, State,
};
