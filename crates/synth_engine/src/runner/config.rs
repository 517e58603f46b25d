//! Batch runner configuration.

use synth_core::types::{Result, SimulationError};

use crate::metrics::TradingConvention;

/// Maximum number of paths allowed in one batch.
pub const MAX_PATHS: usize = 10_000_000;

/// Default batch size below which paths run sequentially.
pub const DEFAULT_MIN_PATHS_FOR_PARALLEL: usize = 32;

/// Thread usage for batch runs.
///
/// Paths share nothing but the read-only configuration, so they can be
/// scheduled freely; results are always collected in path-index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Whether rayon may be used at all.
    pub enabled: bool,
    /// Batches smaller than this run on the calling thread.
    pub min_paths_for_parallel: usize,
    /// Size of a dedicated thread pool; `None` uses the global pool.
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_paths_for_parallel: DEFAULT_MIN_PATHS_FOR_PARALLEL,
            num_threads: None,
        }
    }
}

impl ParallelConfig {
    /// Configuration that never leaves the calling thread.
    #[inline]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Determines if a batch of `num_paths` should run in parallel.
    #[inline]
    pub fn should_parallelise(&self, num_paths: usize) -> bool {
        self.enabled && num_paths >= self.min_paths_for_parallel.max(2)
    }
}

/// Batch-level settings: how many paths, how to annualise, how to schedule.
///
/// Use [`RunnerConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use synth_engine::metrics::TradingConvention;
/// use synth_engine::runner::RunnerConfig;
///
/// let config = RunnerConfig::builder()
///     .num_paths(1_000)
///     .convention(TradingConvention::CALENDAR_DAILY)
///     .num_threads(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.num_paths(), 1_000);
/// assert_eq!(config.parallel().num_threads, Some(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunnerConfig {
    num_paths: usize,
    convention: TradingConvention,
    parallel: ParallelConfig,
}

impl RunnerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::default()
    }

    /// Number of paths in a batch.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Annualisation convention for volatility.
    #[inline]
    pub fn convention(&self) -> TradingConvention {
        self.convention
    }

    /// Thread usage.
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] if:
    /// - `num_paths` is 0 or greater than [`MAX_PATHS`]
    /// - `num_threads` is `Some(0)`
    pub fn validate(&self) -> Result<()> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(SimulationError::config(
                "num_paths",
                format!("must be in [1, {}], got {}", MAX_PATHS, self.num_paths),
            ));
        }
        if self.parallel.num_threads == Some(0) {
            return Err(SimulationError::config(
                "num_threads",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            num_paths: 1,
            convention: TradingConvention::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// Builder for [`RunnerConfig`].
///
/// Unset fields fall back to one path, the equity convention and the
/// default [`ParallelConfig`].
#[derive(Clone, Debug, Default)]
pub struct RunnerConfigBuilder {
    num_paths: Option<usize>,
    convention: Option<TradingConvention>,
    parallel: ParallelConfig,
}

impl RunnerConfigBuilder {
    /// Sets the number of paths.
    #[inline]
    pub fn num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = Some(num_paths);
        self
    }

    /// Sets the annualisation convention.
    #[inline]
    pub fn convention(mut self, convention: TradingConvention) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Replaces the whole parallel configuration.
    #[inline]
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables rayon.
    #[inline]
    pub fn parallel_enabled(mut self, enabled: bool) -> Self {
        self.parallel.enabled = enabled;
        self
    }

    /// Sets the batch size at which rayon takes over.
    #[inline]
    pub fn min_paths_for_parallel(mut self, min_paths: usize) -> Self {
        self.parallel.min_paths_for_parallel = min_paths;
        self
    }

    /// Runs batches in a dedicated pool of `num_threads` workers.
    #[inline]
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.parallel.num_threads = Some(num_threads);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] on invalid values.
    pub fn build(self) -> Result<RunnerConfig> {
        let config = RunnerConfig {
            num_paths: self.num_paths.unwrap_or(1),
            convention: self.convention.unwrap_or_default(),
            parallel: self.parallel,
        };
        config.validate()?;
        Ok(config)
    }
}
