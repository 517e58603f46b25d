//! Simulation configuration.
//!
//! [`SimulationConfig`] is the immutable parameter set of one simulation.
//! It can only be obtained through validation, either from
//! [`SimulationConfigBuilder::build`] or by converting raw
//! [`SimulationParams`] (for example, as deserialised from a file), so every
//! instance in circulation satisfies the validation contract.

use crate::types::{Result, SimulationError};

/// Default price floor: a small positive epsilon keeping log returns defined.
pub const DEFAULT_PRICE_FLOOR: f64 = 1e-12;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000_000;

/// Raw, unvalidated simulation parameters.
///
/// This is the shape in which an external loader supplies configuration.
/// Convert with [`SimulationConfig::try_from`] to validate.
///
/// # Examples
///
/// ```rust
/// use synth_core::config::{SimulationConfig, SimulationParams};
///
/// let params = SimulationParams {
///     seed: 7,
///     num_steps: 100,
///     ..SimulationParams::default()
/// };
/// let config = SimulationConfig::try_from(params).unwrap();
/// assert_eq!(config.seed(), 7);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimulationParams {
    /// Top-level seed.
    ///
    /// Serialised as an integer up to `i64::MAX` and as a decimal string
    /// above it, since TOML integers are signed 64-bit.
    #[cfg_attr(feature = "serde", serde(with = "seed_repr"))]
    pub seed: u64,
    /// Number of steps per path.
    pub num_steps: usize,
    /// Time-step size.
    pub dt: f64,
    /// Price at step 0.
    pub initial_price: f64,
    /// Equilibrium price the restoring force pulls towards.
    pub mean_reversion_level: f64,
    /// Spring constant of the restoring force.
    pub mean_reversion_rate: f64,
    /// Friction coefficient applied to momentum each step.
    pub momentum_damping: f64,
    /// Scale of the stochastic force.
    pub noise_scale: f64,
    /// Absolute cap on the price change of one step.
    pub max_step_jump: f64,
    /// Lowest admissible price.
    pub price_floor: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            num_steps: 252,
            dt: 1.0,
            initial_price: 100.0,
            mean_reversion_level: 100.0,
            mean_reversion_rate: 0.1,
            momentum_damping: 0.2,
            noise_scale: 1.0,
            max_step_jump: 5.0,
            price_floor: DEFAULT_PRICE_FLOOR,
        }
    }
}

/// Validated, immutable simulation configuration.
///
/// # Validation Contract
///
/// - `num_steps` in `[1, MAX_STEPS]`
/// - `dt > 0`, `initial_price > 0`, `max_step_jump > 0`
/// - `noise_scale >= 0`, `mean_reversion_rate >= 0`, `price_floor >= 0`
/// - `momentum_damping` in `[0, 1)`
/// - `initial_price >= price_floor`
/// - every real parameter finite
///
/// # Examples
///
/// ```rust
/// use synth_core::config::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .seed(42)
///     .num_steps(5)
///     .dt(1.0)
///     .initial_price(100.0)
///     .mean_reversion_level(100.0)
///     .mean_reversion_rate(0.1)
///     .momentum_damping(0.2)
///     .noise_scale(0.0)
///     .max_step_jump(50.0)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_steps(), 5);
/// assert_eq!(config.price_floor(), 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    params: SimulationParams,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Top-level seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.params.seed
    }

    /// Number of steps per path.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.params.num_steps
    }

    /// Time-step size.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.params.dt
    }

    /// Price at step 0.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.params.initial_price
    }

    /// Equilibrium price level.
    #[inline]
    pub fn mean_reversion_level(&self) -> f64 {
        self.params.mean_reversion_level
    }

    /// Spring constant.
    #[inline]
    pub fn mean_reversion_rate(&self) -> f64 {
        self.params.mean_reversion_rate
    }

    /// Friction coefficient.
    #[inline]
    pub fn momentum_damping(&self) -> f64 {
        self.params.momentum_damping
    }

    /// Scale of the stochastic force.
    #[inline]
    pub fn noise_scale(&self) -> f64 {
        self.params.noise_scale
    }

    /// Absolute cap on one step's price change.
    #[inline]
    pub fn max_step_jump(&self) -> f64 {
        self.params.max_step_jump
    }

    /// Lowest admissible price.
    #[inline]
    pub fn price_floor(&self) -> f64 {
        self.params.price_floor
    }

    /// Borrows the underlying parameter values.
    #[inline]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Returns a copy of this configuration with a different seed.
    ///
    /// The seed has no validity constraint, so this cannot fail.
    pub fn with_seed(&self, seed: u64) -> Self {
        let mut params = self.params.clone();
        params.seed = seed;
        Self { params }
    }

    /// Validates raw parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] naming the first field
    /// that violates the validation contract.
    pub fn validate(params: &SimulationParams) -> Result<()> {
        if params.num_steps == 0 || params.num_steps > MAX_STEPS {
            return Err(SimulationError::config(
                "num_steps",
                format!("must be in [1, {}], got {}", MAX_STEPS, params.num_steps),
            ));
        }

        require_finite("dt", params.dt)?;
        require_finite("initial_price", params.initial_price)?;
        require_finite("mean_reversion_level", params.mean_reversion_level)?;
        require_finite("mean_reversion_rate", params.mean_reversion_rate)?;
        require_finite("momentum_damping", params.momentum_damping)?;
        require_finite("noise_scale", params.noise_scale)?;
        require_finite("max_step_jump", params.max_step_jump)?;
        require_finite("price_floor", params.price_floor)?;

        require_positive("dt", params.dt)?;
        require_positive("initial_price", params.initial_price)?;
        require_positive("max_step_jump", params.max_step_jump)?;
        require_non_negative("mean_reversion_rate", params.mean_reversion_rate)?;
        require_non_negative("noise_scale", params.noise_scale)?;
        require_non_negative("price_floor", params.price_floor)?;

        if !(0.0..1.0).contains(&params.momentum_damping) {
            return Err(SimulationError::config(
                "momentum_damping",
                format!("must lie in [0, 1), got {}", params.momentum_damping),
            ));
        }

        if params.initial_price < params.price_floor {
            return Err(SimulationError::config(
                "initial_price",
                format!(
                    "must be at least price_floor ({}), got {}",
                    params.price_floor, params.initial_price
                ),
            ));
        }

        Ok(())
    }
}

impl TryFrom<SimulationParams> for SimulationConfig {
    type Error = SimulationError;

    fn try_from(params: SimulationParams) -> Result<Self> {
        Self::validate(&params)?;
        Ok(Self { params })
    }
}

impl From<SimulationConfig> for SimulationParams {
    fn from(config: SimulationConfig) -> Self {
        config.params
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SimulationConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.params, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SimulationConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let params = <SimulationParams as serde::Deserialize>::deserialize(deserializer)?;
        SimulationConfig::try_from(params).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
mod seed_repr {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(seed: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match i64::try_from(*seed) {
            Ok(signed) => serializer.serialize_i64(signed),
            Err(_) => serializer.serialize_str(&seed.to_string()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SeedVisitor)
    }

    struct SeedVisitor;

    impl<'de> Visitor<'de> for SeedVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::config(
            field,
            format!("must be finite, got {}", value),
        ))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::config(
            field,
            format!("must be positive, got {}", value),
        ))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::config(
            field,
            format!("must be non-negative, got {}", value),
        ))
    }
}

/// Builder for [`SimulationConfig`].
///
/// `num_steps` must be set explicitly; every other field falls back to the
/// [`SimulationParams`] default. Validation runs in [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    num_steps: Option<usize>,
    params: SimulationParams,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            num_steps: None,
            params: SimulationParams::default(),
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the top-level seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Sets the number of steps per path.
    #[inline]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = Some(num_steps);
        self
    }

    /// Sets the time-step size.
    #[inline]
    pub fn dt(mut self, dt: f64) -> Self {
        self.params.dt = dt;
        self
    }

    /// Sets the price at step 0.
    #[inline]
    pub fn initial_price(mut self, initial_price: f64) -> Self {
        self.params.initial_price = initial_price;
        self
    }

    /// Sets the equilibrium price level.
    #[inline]
    pub fn mean_reversion_level(mut self, level: f64) -> Self {
        self.params.mean_reversion_level = level;
        self
    }

    /// Sets the spring constant.
    #[inline]
    pub fn mean_reversion_rate(mut self, rate: f64) -> Self {
        self.params.mean_reversion_rate = rate;
        self
    }

    /// Sets the friction coefficient, in `[0, 1)`.
    #[inline]
    pub fn momentum_damping(mut self, damping: f64) -> Self {
        self.params.momentum_damping = damping;
        self
    }

    /// Sets the scale of the stochastic force.
    #[inline]
    pub fn noise_scale(mut self, noise_scale: f64) -> Self {
        self.params.noise_scale = noise_scale;
        self
    }

    /// Sets the absolute cap on one step's price change.
    #[inline]
    pub fn max_step_jump(mut self, max_step_jump: f64) -> Self {
        self.params.max_step_jump = max_step_jump;
        self
    }

    /// Sets the lowest admissible price.
    #[inline]
    pub fn price_floor(mut self, price_floor: f64) -> Self {
        self.params.price_floor = price_floor;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] if `num_steps` was not
    /// set or any parameter violates the validation contract.
    pub fn build(self) -> Result<SimulationConfig> {
        let num_steps = self
            .num_steps
            .ok_or_else(|| SimulationError::config("num_steps", "must be specified"))?;

        SimulationConfig::try_from(SimulationParams {
            num_steps,
            ..self.params
        })
    }
}
