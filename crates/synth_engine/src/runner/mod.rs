//! Batch simulation.
//!
//! A [`SimulationRunner`] pairs one [`SimulationConfig`](synth_core::config::SimulationConfig)
//! with a [`RunnerConfig`] and turns path indices into [`PathReport`]s:
//!
//! ```text
//! path_index ──► PathGenerator ──► Path ──► MetricsCalculator ──► PathReport
//! ```
//!
//! Paths are independent, so batches fan out over rayon once they reach
//! [`ParallelConfig::min_paths_for_parallel`]. Output is always in path-index
//! order and identical to a sequential run.

pub mod config;
pub mod report;
pub mod simulation;

pub use config::{
    ParallelConfig, RunnerConfig, RunnerConfigBuilder, DEFAULT_MIN_PATHS_FOR_PARALLEL, MAX_PATHS,
};
pub use report::{BatchSummary, PathReport, SimulationReport};
pub use simulation::SimulationRunner;
