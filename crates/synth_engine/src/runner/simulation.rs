//! Batch orchestration.

use std::time::Instant;

use rayon::prelude::*;
use synth_core::config::SimulationConfig;
use synth_core::types::{Result, SimulationError};
use tracing::{debug, info, warn};

use super::config::RunnerConfig;
use super::report::{PathReport, SimulationReport};
use crate::metrics::MetricsCalculator;
use crate::path::PathGenerator;

/// Runs paths of one configuration and computes their metrics.
///
/// The runner holds only read-only state, so it is shared by reference
/// across rayon workers.
///
/// # Examples
///
/// ```rust
/// use synth_core::config::SimulationConfig;
/// use synth_engine::runner::{RunnerConfig, SimulationRunner};
///
/// let config = SimulationConfig::builder()
///     .seed(42)
///     .num_steps(20)
///     .build()
///     .unwrap();
/// let runner_config = RunnerConfig::builder().num_paths(8).build().unwrap();
///
/// let runner = SimulationRunner::new(config, runner_config).unwrap();
/// let report = runner.run().unwrap();
///
/// assert_eq!(report.reports.len(), 8);
/// assert_eq!(report.reports[3].path_index, 3);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
    runner_config: RunnerConfig,
    metrics: MetricsCalculator,
}

impl SimulationRunner {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] if `runner_config` is
    /// invalid.
    pub fn new(config: SimulationConfig, runner_config: RunnerConfig) -> Result<Self> {
        runner_config.validate()?;
        let metrics = MetricsCalculator::from_config(&config, runner_config.convention());
        Ok(Self {
            config,
            runner_config,
            metrics,
        })
    }

    /// Simulation parameters.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Batch settings.
    #[inline]
    pub fn runner_config(&self) -> &RunnerConfig {
        &self.runner_config
    }

    /// Generates path `path_index` and computes its metrics.
    ///
    /// The result depends only on the configuration and `path_index`.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::NumericalInstability`] if the path diverges
    /// - [`SimulationError::NonPositivePrice`] if a zero floor lets the price
    ///   reach 0
    pub fn run_path(&self, path_index: u64) -> Result<PathReport> {
        self.try_run_path(path_index).inspect_err(|err| {
            warn!(path_index, error = %err, "path failed");
        })
    }

    fn try_run_path(&self, path_index: u64) -> Result<PathReport> {
        let (path_index, path, clamp_stats) = PathGenerator::new(&self.config, path_index)
            .run()?
            .into_parts();
        let metrics = self.metrics.compute(&path)?;

        debug!(
            path_index,
            terminal_price = metrics.terminal_price,
            annualized_volatility = metrics.annualized_volatility,
            max_drawdown = metrics.max_drawdown,
            clamped_steps = clamp_stats.total(),
            "path completed"
        );

        Ok(PathReport {
            path_index,
            path,
            metrics,
            clamp_stats,
        })
    }

    /// Runs path 0 only.
    ///
    /// # Errors
    ///
    /// As [`run_path`](Self::run_path).
    #[inline]
    pub fn run_single(&self) -> Result<PathReport> {
        self.run_path(0)
    }

    /// Runs every path of the batch.
    ///
    /// Reports are ordered by path index whatever the scheduling, and a
    /// parallel run is bit-identical to a sequential one. If several paths
    /// fail, the error of the lowest path index is returned.
    ///
    /// # Errors
    ///
    /// Returns the first path error by index, or
    /// [`SimulationError::ConfigValidation`] if the dedicated thread pool
    /// cannot be created.
    pub fn run(&self) -> Result<SimulationReport> {
        let num_paths = self.runner_config.num_paths();
        let parallel = self.runner_config.parallel();
        let use_parallel = parallel.should_parallelise(num_paths);
        let start = Instant::now();

        info!(
            num_paths,
            num_steps = self.config.num_steps(),
            seed = self.config.seed(),
            parallel = use_parallel,
            num_threads = ?parallel.num_threads,
            "starting batch"
        );

        let reports = if use_parallel {
            match parallel.num_threads {
                Some(num_threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(num_threads)
                        .build()
                        .map_err(|e| SimulationError::config("num_threads", e.to_string()))?;
                    pool.install(|| self.run_parallel(num_paths))?
                }
                None => self.run_parallel(num_paths)?,
            }
        } else {
            self.run_sequential(num_paths)?
        };

        let report = SimulationReport::from_reports(reports);

        info!(
            num_paths = report.summary.num_paths,
            mean_terminal_price = report.summary.mean_terminal_price,
            mean_annualized_volatility = report.summary.mean_annualized_volatility,
            worst_max_drawdown = report.summary.worst_max_drawdown,
            total_clamp_events = report.summary.total_clamp_events,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch completed"
        );

        Ok(report)
    }

    /// Alias of [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run).
    #[inline]
    pub fn run_batch(&self) -> Result<SimulationReport> {
        self.run()
    }

    fn run_sequential(&self, num_paths: usize) -> Result<Vec<PathReport>> {
        (0..num_paths)
            .map(|i| self.run_path(i as u64))
            .collect()
    }

    fn run_parallel(&self, num_paths: usize) -> Result<Vec<PathReport>> {
        // Collect every outcome first so the lowest failing index wins
        let outcomes: Vec<Result<PathReport>> = (0..num_paths)
            .into_par_iter()
            .map(|i| self.run_path(i as u64))
            .collect();
        outcomes.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ParallelConfig;

    fn sim_config() -> SimulationConfig {
        SimulationConfig::builder()
            .seed(7)
            .num_steps(40)
            .noise_scale(2.0)
            .build()
            .unwrap()
    }

    fn runner(num_paths: usize, parallel: ParallelConfig) -> SimulationRunner {
        let runner_config = RunnerConfig::builder()
            .num_paths(num_paths)
            .parallel(parallel)
            .build()
            .unwrap();
        SimulationRunner::new(sim_config(), runner_config).unwrap()
    }

    #[test]
    fn test_run_single_matches_path_zero() {
        let runner = runner(4, ParallelConfig::sequential());
        let single = runner.run_single().unwrap();
        let batch = runner.run().unwrap();
        assert_eq!(single, batch.reports[0]);
    }

    #[test]
    fn test_reports_ordered_by_index() {
        let runner = runner(16, ParallelConfig::sequential());
        let report = runner.run_batch().unwrap();
        for (i, path_report) in report.reports.iter().enumerate() {
            assert_eq!(path_report.path_index, i as u64);
            assert_eq!(path_report.path.len(), 41);
        }
        assert_eq!(report.summary.num_paths, 16);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = runner(24, ParallelConfig::sequential()).run().unwrap();
        let parallel = runner(
            24,
            ParallelConfig {
                enabled: true,
                min_paths_for_parallel: 2,
                num_threads: Some(3),
            },
        )
        .run()
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_failed_path_reports_lowest_index() {
        // A zero floor with huge noise drives some paths to price 0
        let config = SimulationConfig::builder()
            .seed(1)
            .num_steps(200)
            .initial_price(1.0)
            .mean_reversion_level(1.0)
            .noise_scale(1_000.0)
            .max_step_jump(1_000.0)
            .price_floor(0.0)
            .build()
            .unwrap();
        let sequential = SimulationRunner::new(
            config.clone(),
            RunnerConfig::builder()
                .num_paths(8)
                .parallel(ParallelConfig::sequential())
                .build()
                .unwrap(),
        )
        .unwrap()
        .run();
        let parallel = SimulationRunner::new(
            config,
            RunnerConfig::builder()
                .num_paths(8)
                .min_paths_for_parallel(2)
                .build()
                .unwrap(),
        )
        .unwrap()
        .run();

        assert!(matches!(
            sequential,
            Err(SimulationError::NonPositivePrice { .. })
        ));
        assert_eq!(sequential, parallel);
    }
}
