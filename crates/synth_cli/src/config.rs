//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`SYNTH_*`)
//! 3. Config file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use synth_core::config::{SimulationConfig, SimulationParams};
use synth_core::types::SimulationError;
use synth_engine::metrics::TradingConvention;
use synth_engine::runner::{ParallelConfig, RunnerConfig, DEFAULT_MIN_PATHS_FOR_PARALLEL};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: json, table")]
    InvalidOutputFormat(String),

    /// Neither a known convention name nor a positive number.
    #[error("Invalid trading convention: {0}. Use equity, calendar, weekly, monthly or a number of periods per year")]
    InvalidConvention(String),

    /// The config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// An environment variable held an unparsable value.
    #[error("Environment variable {var} has invalid value {value:?}")]
    EnvError {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// The resolved parameters failed validation.
    #[error(transparent)]
    Validation(#[from] SimulationError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every guardrail event.
    Trace,
    /// Per-path completion.
    Debug,
    /// Batch start and finish.
    #[default]
    Info,
    /// Path failures.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Rendering of simulation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document.
    #[default]
    Json,
    /// Fixed-width text table.
    Table,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

/// Raw batch settings as read from the `[runner]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerParams {
    /// Number of paths per batch
    pub num_paths: usize,
    /// Convention name or periods per year
    pub convention: String,
    /// Whether rayon may be used
    pub parallel: bool,
    /// Batch size at which rayon takes over
    pub min_paths_for_parallel: usize,
    /// Size of a dedicated thread pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<usize>,
}

impl Default for RunnerParams {
    fn default() -> Self {
        Self {
            num_paths: 1,
            convention: "equity".to_string(),
            parallel: true,
            min_paths_for_parallel: DEFAULT_MIN_PATHS_FOR_PARALLEL,
            num_threads: None,
        }
    }
}

impl RunnerParams {
    /// Resolves the convention name or number
    pub fn trading_convention(&self) -> Result<TradingConvention, ConfigError> {
        if let Some(convention) = TradingConvention::from_name(&self.convention) {
            return Ok(convention);
        }
        self.convention
            .parse::<f64>()
            .ok()
            .and_then(|periods| TradingConvention::new(periods).ok())
            .ok_or_else(|| ConfigError::InvalidConvention(self.convention.clone()))
    }

    /// Builds a validated runner configuration
    pub fn to_runner_config(&self) -> Result<RunnerConfig, ConfigError> {
        let config = RunnerConfig::builder()
            .num_paths(self.num_paths)
            .convention(self.trading_convention()?)
            .parallel(ParallelConfig {
                enabled: self.parallel,
                min_paths_for_parallel: self.min_paths_for_parallel,
                num_threads: self.num_threads,
            })
            .build()?;
        Ok(config)
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Output format for `simulate`
    pub output: OutputFormat,
    /// Simulation parameters
    pub simulation: SimulationParams,
    /// Batch settings
    pub runner: RunnerParams,
}

/// Environment variable lookup, injectable for tests
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_override<T: FromStr>(
    lookup: EnvLookup<'_>,
    var: &'static str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvError { var, value })?;
    }
    Ok(())
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `SYNTH_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(&|var| std::env::var(var).ok())
    }

    /// Apply `SYNTH_*` overrides from `lookup`
    pub fn apply_env_from(&mut self, lookup: EnvLookup<'_>) -> Result<(), ConfigError> {
        if let Some(level) = lookup("SYNTH_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(output) = lookup("SYNTH_OUTPUT") {
            self.output = OutputFormat::from_str(&output)?;
        }

        let sim = &mut self.simulation;
        env_override(lookup, "SYNTH_SEED", &mut sim.seed)?;
        env_override(lookup, "SYNTH_NUM_STEPS", &mut sim.num_steps)?;
        env_override(lookup, "SYNTH_DT", &mut sim.dt)?;
        env_override(lookup, "SYNTH_INITIAL_PRICE", &mut sim.initial_price)?;
        env_override(lookup, "SYNTH_MEAN_REVERSION_LEVEL", &mut sim.mean_reversion_level)?;
        env_override(lookup, "SYNTH_MEAN_REVERSION_RATE", &mut sim.mean_reversion_rate)?;
        env_override(lookup, "SYNTH_MOMENTUM_DAMPING", &mut sim.momentum_damping)?;
        env_override(lookup, "SYNTH_NOISE_SCALE", &mut sim.noise_scale)?;
        env_override(lookup, "SYNTH_MAX_STEP_JUMP", &mut sim.max_step_jump)?;
        env_override(lookup, "SYNTH_PRICE_FLOOR", &mut sim.price_floor)?;

        let runner = &mut self.runner;
        env_override(lookup, "SYNTH_NUM_PATHS", &mut runner.num_paths)?;
        env_override(lookup, "SYNTH_CONVENTION", &mut runner.convention)?;
        env_override(lookup, "SYNTH_PARALLEL", &mut runner.parallel)?;
        env_override(
            lookup,
            "SYNTH_MIN_PATHS_FOR_PARALLEL",
            &mut runner.min_paths_for_parallel,
        )?;
        if let Some(value) = lookup("SYNTH_NUM_THREADS") {
            let threads = value.trim().parse().map_err(|_| ConfigError::EnvError {
                var: "SYNTH_NUM_THREADS",
                value,
            })?;
            runner.num_threads = Some(threads);
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = seed;
        }
        if let Some(num_steps) = cli.num_steps {
            self.simulation.num_steps = num_steps;
        }
        if let Some(num_paths) = cli.num_paths {
            self.runner.num_paths = num_paths;
        }
        if let Some(num_threads) = cli.num_threads {
            self.runner.num_threads = Some(num_threads);
        }
        if cli.sequential {
            self.runner.parallel = false;
        }
    }

    /// Validate and convert into engine configuration
    pub fn resolve(&self) -> Result<(SimulationConfig, RunnerConfig), ConfigError> {
        let simulation = SimulationConfig::try_from(self.simulation.clone())?;
        let runner = self.runner.to_runner_config()?;
        Ok((simulation, runner))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub output: Option<OutputFormat>,
    /// Seed override
    pub seed: Option<u64>,
    /// Step count override
    pub num_steps: Option<usize>,
    /// Path count override
    pub num_paths: Option<usize>,
    /// Dedicated pool size override
    pub num_threads: Option<usize>,
    /// Force sequential execution
    pub sequential: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServiceConfig, ConfigError> {
    build_config_with_env(cli, &|var| std::env::var(var).ok())
}

/// [`build_config`] with an explicit environment
pub fn build_config_with_env(
    cli: &CliArgs,
    lookup: EnvLookup<'_>,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    };

    config.apply_env_from(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
