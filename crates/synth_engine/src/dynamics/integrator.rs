//! Symplectic price integrator.
//!
//! The price is treated as the position of a damped, noisy oscillator around
//! the mean-reversion level. One step is a semi-implicit (symplectic Euler)
//! update: momentum is advanced first using forces evaluated at the current
//! price, then price is advanced using the *updated* momentum.
//!
//! ```text
//! F      = -k (p - L)
//! ε      = σ · z,           z ~ N(0, 1)
//! m'     = (1 - γ) m + (F + ε) dt
//! p'     = p + m' dt
//! ```
//!
//! Force and noise act on momentum only. Price changes solely through `m'`.

use synth_core::config::SimulationConfig;
use synth_core::types::State;

/// One-step state transition driven by an external standard-normal shock.
///
/// Implementations must be pure: the proposed state depends only on the
/// current state and the shock, so that replaying a stream replays the path.
pub trait PriceDynamics {
    /// Deterministic force acting on momentum at `price`.
    fn restoring_force(&self, price: f64) -> f64;

    /// Proposes the state following `state` given the shock `z`.
    fn propose(&self, state: &State, z: f64) -> State;
}

/// Mean-reverting, damped symplectic integrator.
///
/// # Examples
///
/// ```rust
/// use synth_core::config::SimulationConfig;
/// use synth_core::types::State;
/// use synth_engine::dynamics::{PriceDynamics, SymplecticIntegrator};
///
/// let config = SimulationConfig::builder()
///     .num_steps(1)
///     .initial_price(110.0)
///     .mean_reversion_level(100.0)
///     .mean_reversion_rate(0.1)
///     .momentum_damping(0.2)
///     .noise_scale(0.0)
///     .build()
///     .unwrap();
///
/// let integrator = SymplecticIntegrator::from_config(&config);
/// let next = integrator.propose(&State::initial(110.0), 0.0);
///
/// assert_eq!(next.momentum, -1.0);
/// assert_eq!(next.price, 109.0);
/// assert_eq!(next.step_index, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymplecticIntegrator {
    level: f64,
    rate: f64,
    /// Momentum retained per step, `1 - damping`.
    retention: f64,
    noise_scale: f64,
    dt: f64,
}

impl SymplecticIntegrator {
    /// Creates an integrator from explicit coefficients.
    pub fn new(level: f64, rate: f64, damping: f64, noise_scale: f64, dt: f64) -> Self {
        Self {
            level,
            rate,
            retention: 1.0 - damping,
            noise_scale,
            dt,
        }
    }

    /// Creates an integrator from a validated configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.mean_reversion_level(),
            config.mean_reversion_rate(),
            config.momentum_damping(),
            config.noise_scale(),
            config.dt(),
        )
    }

    /// Time-step size.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

impl PriceDynamics for SymplecticIntegrator {
    #[inline]
    fn restoring_force(&self, price: f64) -> f64 {
        -self.rate * (price - self.level)
    }

    #[inline]
    fn propose(&self, state: &State, z: f64) -> State {
        let force = self.restoring_force(state.price);
        let noise = z * self.noise_scale;

        let momentum = self.retention * state.momentum + (force + noise) * self.dt;
        let price = state.price + momentum * self.dt;

        State::new(price, momentum, state.step_index + 1)
    }
}
