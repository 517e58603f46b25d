//! # synth_cli: Command-Line Runner for the Synthetic Market Simulator
//!
//! ## Service Layer Role
//!
//! synth_cli is the outermost layer. It owns everything the library crates
//! deliberately leave out:
//! - Layered configuration (TOML file, `SYNTH_*` environment, CLI flags)
//! - `tracing-subscriber` initialisation
//! - JSON and table rendering of batch results
//!
//! ## Commands
//!
//! - `synth simulate` - Run a batch and print its results
//! - `synth validate` - Resolve and validate the configuration only
//! - `synth check` - Print build and runtime information
//!
//! ## Config File
//!
//! ```toml
//! log_level = "info"
//! output = "json"
//!
//! [simulation]
//! seed = 42
//! num_steps = 252
//! noise_scale = 1.0
//! max_step_jump = 5.0
//!
//! [runner]
//! num_paths = 1000
//! convention = "equity"
//! num_threads = 8
//! ```

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
