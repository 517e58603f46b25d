//! Risk metrics over a completed path.
//!
//! All functions here are pure: they read a path and allocate only the
//! returned log-return vector.

use synth_core::config::SimulationConfig;
use synth_core::types::{Metrics, Path, Result, SimulationError};

use super::convention::TradingConvention;

/// Computes `ln(price[i+1] / price[i])` for every step of `path`.
///
/// # Errors
///
/// - [`SimulationError::EmptyPath`] if the path has fewer than two states
/// - [`SimulationError::NonPositivePrice`] if any price is `<= 0`
pub fn log_returns(path: &Path) -> Result<Vec<f64>> {
    if path.len() < 2 {
        return Err(SimulationError::EmptyPath { len: path.len() });
    }

    if let Some(state) = path.states().iter().find(|s| s.price <= 0.0) {
        return Err(SimulationError::NonPositivePrice {
            step_index: state.step_index,
            price: state.price,
        });
    }

    Ok(path
        .states()
        .windows(2)
        .map(|w| (w[1].price / w[0].price).ln())
        .collect())
}

/// Sample (N − 1) standard deviation.
///
/// Returns 0 for fewer than two values, and exactly 0 when all values are
/// bit-identical.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let first = values[0];
    if values.iter().all(|v| v.to_bits() == first.to_bits()) {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Sample volatility of `returns` scaled by `sqrt(periods_per_year)`.
#[inline]
pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    sample_std_dev(returns) * periods_per_year.sqrt()
}

/// Largest decline from a running peak, as a fraction of that peak.
///
/// Prices must be positive. Returns 0 for a non-decreasing series or an
/// empty one.
///
/// # Examples
///
/// ```rust
/// use synth_engine::metrics::max_drawdown;
///
/// let dd = max_drawdown([100.0, 120.0, 90.0, 130.0, 117.0]);
/// assert!((dd - 0.25).abs() < 1e-12);
///
/// assert_eq!(max_drawdown([1.0, 2.0, 3.0]), 0.0);
/// ```
pub fn max_drawdown<I>(prices: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;

    for price in prices {
        peak = peak.max(price);
        let drawdown = (peak - price) / peak;
        worst = worst.max(drawdown);
    }

    worst.clamp(0.0, 1.0)
}

/// Converts completed paths into [`Metrics`].
///
/// # Examples
///
/// ```rust
/// use synth_core::types::{Path, State};
/// use synth_engine::metrics::{MetricsCalculator, TradingConvention};
///
/// let path = Path::from_states(vec![
///     State::initial(100.0),
///     State::new(110.0, 10.0, 1),
///     State::new(99.0, -11.0, 2),
/// ]);
///
/// let calc = MetricsCalculator::new(TradingConvention::EQUITY_DAILY, 1.0).unwrap();
/// let metrics = calc.compute(&path).unwrap();
///
/// assert_eq!(metrics.log_returns.len(), 2);
/// assert_eq!(metrics.terminal_price, 99.0);
/// assert!((metrics.max_drawdown - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricsCalculator {
    periods_per_year: f64,
}

impl MetricsCalculator {
    /// Creates a calculator for paths with step size `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] unless `dt` is finite
    /// and positive.
    pub fn new(convention: TradingConvention, dt: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimulationError::config(
                "dt",
                format!("must be finite and positive, got {}", dt),
            ));
        }
        Ok(Self::with_periods(convention, dt))
    }

    /// Creates a calculator matching the step size of `config`.
    ///
    /// A validated config always has a finite positive `dt`.
    pub fn from_config(config: &SimulationConfig, convention: TradingConvention) -> Self {
        Self::with_periods(convention, config.dt())
    }

    fn with_periods(convention: TradingConvention, dt: f64) -> Self {
        Self {
            periods_per_year: convention.periods_per_year(dt),
        }
    }

    /// Annualisation factor applied to per-step volatility (squared).
    #[inline]
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Computes all metrics of `path`.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::EmptyPath`] if the path has fewer than two states
    /// - [`SimulationError::NonPositivePrice`] if any price is `<= 0`
    pub fn compute(&self, path: &Path) -> Result<Metrics> {
        let log_returns = log_returns(path)?;
        let annualized_volatility = annualized_volatility(&log_returns, self.periods_per_year);
        let max_drawdown = max_drawdown(path.prices());
        let terminal_price = path
            .terminal()
            .map(|s| s.price)
            .ok_or(SimulationError::EmptyPath { len: 0 })?;

        Ok(Metrics {
            log_returns,
            annualized_volatility,
            max_drawdown,
            terminal_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use synth_core::types::State;

    fn path_of(prices: &[f64]) -> Path {
        Path::from_states(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| State::new(p, 0.0, i))
                .collect(),
        )
    }

    #[test]
    fn test_log_returns() {
        let path = path_of(&[100.0, 110.0, 99.0]);
        let r = log_returns(&path).unwrap();
        assert_relative_eq!(r[0], (1.1_f64).ln(), epsilon = 1e-15);
        assert_relative_eq!(r[1], (0.9_f64).ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_empty_path_errors() {
        let calc = MetricsCalculator::new(TradingConvention::default(), 1.0).unwrap();
        assert_eq!(
            calc.compute(&Path::default()),
            Err(SimulationError::EmptyPath { len: 0 })
        );
        assert_eq!(
            calc.compute(&path_of(&[100.0])),
            Err(SimulationError::EmptyPath { len: 1 })
        );
    }

    #[test]
    fn test_non_positive_price_errors() {
        let result = log_returns(&path_of(&[1.0, 0.5, 0.0, 0.5]));
        assert_eq!(
            result,
            Err(SimulationError::NonPositivePrice {
                step_index: 2,
                price: 0.0
            })
        );
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of [1, 2, 3, 4] is 5/3
        assert_relative_eq!(
            sample_std_dev(&[1.0, 2.0, 3.0, 4.0]),
            (5.0_f64 / 3.0).sqrt(),
            epsilon = 1e-15
        );
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[0.3]), 0.0);
        assert_eq!(sample_std_dev(&[0.1, 0.1, 0.1]), 0.0);
    }

    #[test]
    fn test_annualisation() {
        let returns = [0.01, -0.01, 0.02, -0.02];
        let daily = sample_std_dev(&returns);
        assert_relative_eq!(
            annualized_volatility(&returns, 252.0),
            daily * 252.0_f64.sqrt(),
            epsilon = 1e-15
        );

        let calc = MetricsCalculator::new(TradingConvention::EQUITY_DAILY, 0.5).unwrap();
        assert_eq!(calc.periods_per_year(), 504.0);
    }

    #[test]
    fn test_constant_growth_has_zero_volatility() {
        let path = path_of(&[1.0, 2.0, 4.0, 8.0, 16.0]);
        let calc = MetricsCalculator::new(TradingConvention::default(), 1.0).unwrap();
        let metrics = calc.compute(&path).unwrap();
        assert_eq!(metrics.annualized_volatility, 0.0);
        assert_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.terminal_price, 16.0);
    }

    #[test]
    fn test_max_drawdown() {
        assert_relative_eq!(
            max_drawdown([100.0, 80.0, 120.0, 60.0, 200.0]),
            0.5,
            epsilon = 1e-15
        );
        assert_eq!(max_drawdown([5.0]), 0.0);
        assert_eq!(max_drawdown(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_drawdown_bounded_by_one() {
        let dd = max_drawdown([100.0, 1e-12]);
        assert!(dd <= 1.0 && dd > 0.999);
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = MetricsCalculator::new(TradingConvention::default(), dt).unwrap_err();
            assert!(matches!(
                err,
                SimulationError::ConfigValidation { field: "dt", .. }
            ));
        }
    }

    #[test]
    fn test_from_config_matches_new() {
        let config = SimulationConfig::builder()
            .num_steps(10)
            .dt(0.25)
            .build()
            .unwrap();
        let convention = TradingConvention::WEEKLY;
        assert_eq!(
            MetricsCalculator::from_config(&config, convention),
            MetricsCalculator::new(convention, 0.25).unwrap()
        );
    }
}
