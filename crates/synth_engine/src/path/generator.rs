//! Single-path generation.
//!
//! A [`PathGenerator`] owns everything one simulation run mutates: its
//! random stream, the growing state sequence and the clamp counters. Nothing
//! is shared with other paths, so generators can run on any thread.

use synth_core::config::SimulationConfig;
use synth_core::types::{ClampStats, Path, Result, SimulationError, State};
use tracing::{debug, trace};

use crate::dynamics::{GuardrailEnforcer, PriceDynamics, SymplecticIntegrator};
use crate::rng::DeterministicStream;

/// Lifecycle of a path generator.
///
/// ```text
/// Created ──step──► Running ──num_steps──► Completed
///                      │
///                      └──instability──► Failed
/// ```
///
/// `Completed` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    /// Initial state set, no step taken.
    Created,
    /// At least one step taken, more remain.
    Running,
    /// All steps taken; the path is final.
    Completed,
    /// A step diverged; no further steps are possible.
    Failed {
        /// Step whose proposal was rejected.
        step_index: usize,
    },
}

impl PathStatus {
    /// Returns `true` for `Completed` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PathStatus::Completed | PathStatus::Failed { .. })
    }
}

/// Immutable result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedPath {
    path_index: u64,
    path: Path,
    clamp_stats: ClampStats,
}

impl CompletedPath {
    /// Index of the path within its batch.
    #[inline]
    pub fn path_index(&self) -> u64 {
        self.path_index
    }

    /// The generated path, `num_steps + 1` states long.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Guardrail counters for this path.
    #[inline]
    pub fn clamp_stats(&self) -> ClampStats {
        self.clamp_stats
    }

    /// Splits into path index, path and clamp counters.
    #[inline]
    pub fn into_parts(self) -> (u64, Path, ClampStats) {
        (self.path_index, self.path, self.clamp_stats)
    }
}

/// Drives the integrator and guardrails for one path.
///
/// # Examples
///
/// ```rust
/// use synth_core::config::SimulationConfig;
/// use synth_engine::path::{PathGenerator, PathStatus};
///
/// let config = SimulationConfig::builder()
///     .seed(42)
///     .num_steps(10)
///     .build()
///     .unwrap();
///
/// let mut generator = PathGenerator::new(&config, 0);
/// assert_eq!(generator.status(), PathStatus::Created);
///
/// generator.step().unwrap();
/// assert_eq!(generator.status(), PathStatus::Running);
///
/// let completed = generator.run().unwrap();
/// assert_eq!(completed.path().len(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct PathGenerator<D = SymplecticIntegrator> {
    path_index: u64,
    num_steps: usize,
    dynamics: D,
    guardrail: GuardrailEnforcer,
    stream: DeterministicStream,
    states: Vec<State>,
    clamp_stats: ClampStats,
    status: PathStatus,
    failure: Option<SimulationError>,
}

impl PathGenerator<SymplecticIntegrator> {
    /// Creates the generator of path `path_index` using the symplectic integrator.
    pub fn new(config: &SimulationConfig, path_index: u64) -> Self {
        Self::with_dynamics(config, path_index, SymplecticIntegrator::from_config(config))
    }
}

impl<D: PriceDynamics> PathGenerator<D> {
    /// Creates a generator with caller-supplied dynamics.
    ///
    /// Guardrails, stream and step count still come from `config`.
    pub fn with_dynamics(config: &SimulationConfig, path_index: u64, dynamics: D) -> Self {
        let num_steps = config.num_steps();
        let mut states = Vec::with_capacity(num_steps + 1);
        states.push(State::initial(config.initial_price()));

        Self {
            path_index,
            num_steps,
            dynamics,
            guardrail: GuardrailEnforcer::from_config(config),
            stream: DeterministicStream::new(config.seed(), path_index),
            states,
            clamp_stats: ClampStats::default(),
            status: PathStatus::Created,
            failure: None,
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> PathStatus {
        self.status
    }

    /// Most recent accepted state.
    #[inline]
    pub fn current(&self) -> &State {
        // The initial state is pushed on construction
        &self.states[self.states.len() - 1]
    }

    /// States accepted so far, including the initial one.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Guardrail counters accumulated so far.
    #[inline]
    pub fn clamp_stats(&self) -> ClampStats {
        self.clamp_stats
    }

    /// Advances the path by one step.
    ///
    /// Returns `Ok(Some(state))` with the accepted state, or `Ok(None)` once
    /// the path is complete.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::NumericalInstability`] when the step
    /// diverges. The generator then stays `Failed` and every further call
    /// returns the same error.
    pub fn step(&mut self) -> Result<Option<State>> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.status == PathStatus::Completed {
            return Ok(None);
        }
        self.status = PathStatus::Running;

        let current = *self.current();
        let z = self.stream.next_normal();
        let proposed = self.dynamics.propose(&current, z);

        let outcome = match self.guardrail.enforce(self.path_index, &current, &proposed) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(
                    path_index = self.path_index,
                    step_index = proposed.step_index,
                    error = %err,
                    "path diverged"
                );
                self.status = PathStatus::Failed {
                    step_index: proposed.step_index,
                };
                self.failure = Some(err.clone());
                return Err(err);
            }
        };

        if outcome.clamp.is_clamped() {
            trace!(
                path_index = self.path_index,
                step_index = outcome.state.step_index,
                clamp = ?outcome.clamp,
                proposed_price = proposed.price,
                price = outcome.state.price,
                "guardrail engaged"
            );
        }
        self.clamp_stats.record(outcome.clamp);
        self.states.push(outcome.state);

        if self.states.len() == self.num_steps + 1 {
            self.status = PathStatus::Completed;
        }

        Ok(Some(outcome.state))
    }

    /// Runs all remaining steps and returns the finished path.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::NumericalInstability`] if any step diverges.
    pub fn run(mut self) -> Result<CompletedPath> {
        while self.step()?.is_some() {}

        Ok(CompletedPath {
            path_index: self.path_index,
            path: Path::from_states(self.states),
            clamp_stats: self.clamp_stats,
        })
    }
}
