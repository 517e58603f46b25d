//! # synth_engine: Path Engine for the Synthetic Market Simulator
//!
//! ## Layer 2 (Engine) Role
//!
//! synth_engine turns a validated [`SimulationConfig`](synth_core::config::SimulationConfig)
//! into price paths and risk metrics:
//! - Deterministic per-path random streams (`rng`)
//! - Symplectic price/momentum integration and guardrails (`dynamics`)
//! - Step-by-step path generation with a lifecycle (`path`)
//! - Log returns, annualised volatility and max drawdown (`metrics`)
//! - Sequential or rayon-parallel batch runs (`runner`)
//!
//! ## Determinism
//!
//! Path `i` depends only on `(config, i)`. Each path owns a random stream
//! seeded from the batch seed and its index, draws exactly one standard
//! normal per step, and shares nothing mutable with other paths. A parallel
//! batch is therefore bit-identical to a sequential one.
//!
//! ## Step Pipeline
//!
//! ```text
//! State(t) ─┬─► z = stream.next_normal()
//!           ├─► proposed = integrator.propose(State(t), z)
//!           └─► State(t+1) = guardrail.enforce(State(t), proposed)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use synth_core::config::SimulationConfig;
//! use synth_engine::runner::{RunnerConfig, SimulationRunner};
//!
//! let config = SimulationConfig::builder()
//!     .seed(42)
//!     .num_steps(252)
//!     .noise_scale(0.8)
//!     .max_step_jump(3.0)
//!     .build()
//!     .unwrap();
//!
//! let runner = SimulationRunner::new(
//!     config,
//!     RunnerConfig::builder().num_paths(16).build().unwrap(),
//! )
//! .unwrap();
//!
//! let report = runner.run().unwrap();
//! assert_eq!(report.summary.num_paths, 16);
//! for path_report in &report.reports {
//!     assert!(path_report.path.max_abs_step() <= 3.0);
//!     assert!((0.0..=1.0).contains(&path_report.metrics.max_drawdown));
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for reports and runner settings

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dynamics;
pub mod metrics;
pub mod path;
pub mod rng;
pub mod runner;

pub use dynamics::{GuardrailEnforcer, GuardrailOutcome, PriceDynamics, SymplecticIntegrator};
pub use metrics::{MetricsCalculator, TradingConvention};
pub use path::{CompletedPath, PathGenerator, PathStatus};
pub use rng::DeterministicStream;
pub use runner::{
    BatchSummary, ParallelConfig, PathReport, RunnerConfig, SimulationReport, SimulationRunner,
};
