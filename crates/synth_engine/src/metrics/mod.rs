//! Risk metrics over generated paths.
//!
//! - [`MetricsCalculator`]: path → [`Metrics`](synth_core::types::Metrics)
//! - [`TradingConvention`]: annualisation convention
//! - [`log_returns`], [`sample_std_dev`], [`annualized_volatility`],
//!   [`max_drawdown`]: the underlying pure functions

pub mod calculator;
pub mod convention;

pub use calculator::{
    annualized_volatility, log_returns, max_drawdown, sample_std_dev, MetricsCalculator,
};
pub use convention::TradingConvention;
