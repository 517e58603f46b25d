//! Guardrail enforcement on proposed transitions.
//!
//! Rules are applied in a fixed order:
//!
//! 1. A non-finite proposal is a [`SimulationError::NumericalInstability`].
//! 2. Price below the floor is raised to the floor; negative momentum is zeroed.
//! 3. A price change larger than `max_step_jump` is capped (sign preserved) and
//!    momentum is recomputed as `Δprice / dt` so the pair stays consistent.
//! 4. A non-finite result is a [`SimulationError::NumericalInstability`].
//!
//! Clamping is reported through [`GuardrailOutcome::clamp`], never as an error.

use synth_core::config::SimulationConfig;
use synth_core::types::{ClampKind, Result, SimulationError, State};

/// Final state of one step together with the clamps that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuardrailOutcome {
    /// State to append to the path.
    pub state: State,
    /// Rules that altered the proposal.
    pub clamp: ClampKind,
}

/// Plausibility bounds applied to every step of a path.
///
/// # Examples
///
/// ```rust
/// use synth_core::types::{ClampKind, State};
/// use synth_engine::dynamics::GuardrailEnforcer;
///
/// let guard = GuardrailEnforcer::new(0.01, 0.5, 1.0);
/// let current = State::initial(10.0);
/// let proposed = State::new(12.0, 2.0, 1);
///
/// let outcome = guard.enforce(0, &current, &proposed).unwrap();
/// assert_eq!(outcome.state.price, 10.5);
/// assert_eq!(outcome.state.momentum, 0.5);
/// assert_eq!(outcome.clamp, ClampKind::Jump);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuardrailEnforcer {
    price_floor: f64,
    max_step_jump: f64,
    dt: f64,
}

impl GuardrailEnforcer {
    /// Creates an enforcer from explicit bounds.
    pub fn new(price_floor: f64, max_step_jump: f64, dt: f64) -> Self {
        Self {
            price_floor,
            max_step_jump,
            dt,
        }
    }

    /// Creates an enforcer from a validated configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.price_floor(), config.max_step_jump(), config.dt())
    }

    /// Lowest admissible price.
    #[inline]
    pub fn price_floor(&self) -> f64 {
        self.price_floor
    }

    /// Cap on the absolute price change of one step.
    #[inline]
    pub fn max_step_jump(&self) -> f64 {
        self.max_step_jump
    }

    /// Validates and, if needed, clamps the transition `current -> proposed`.
    ///
    /// `path_index` is only used to label a failure.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::NumericalInstability`] if the proposal or
    /// the clamped result holds a non-finite price or momentum.
    pub fn enforce(
        &self,
        path_index: u64,
        current: &State,
        proposed: &State,
    ) -> Result<GuardrailOutcome> {
        if !proposed.is_finite() {
            return Err(instability(path_index, proposed));
        }

        let mut price = proposed.price;
        let mut momentum = proposed.momentum;

        let floored = price < self.price_floor;
        if floored {
            price = self.price_floor;
            momentum = momentum.max(0.0);
        }

        let delta = price - current.price;
        let jumped = delta.abs() > self.max_step_jump;
        if jumped {
            price = (current.price + self.max_step_jump.copysign(delta)).max(self.price_floor);
            // Rounding in the addition can overshoot the cap by an ulp
            while (price - current.price).abs() > self.max_step_jump {
                price = nudge_toward(price, current.price);
            }
            momentum = (price - current.price) / self.dt;
        }

        let state = State::new(price, momentum, proposed.step_index);
        if !state.is_finite() {
            return Err(instability(path_index, &state));
        }

        Ok(GuardrailOutcome {
            state,
            clamp: ClampKind::from_flags(floored, jumped),
        })
    }
}

/// Moves `x` one representable value towards `target`.
fn nudge_toward(x: f64, target: f64) -> f64 {
    if x == target {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1).copysign(target);
    }
    let bits = x.to_bits();
    let away_from_zero = (target > x) == (x > 0.0);
    f64::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
}

fn instability(path_index: u64, state: &State) -> SimulationError {
    SimulationError::NumericalInstability {
        path_index,
        step_index: state.step_index,
        price: state.price,
        momentum: state.momentum,
    }
}
