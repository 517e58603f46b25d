//! Trading-period conventions for annualisation.

use synth_core::types::{Result, SimulationError};

/// Number of unit-`dt` trading periods in one year.
///
/// A path step of size `dt` covers `dt` trading periods, so a year holds
/// `trading_periods_per_year / dt` steps.
///
/// # Examples
///
/// ```rust
/// use synth_engine::metrics::TradingConvention;
///
/// let daily = TradingConvention::EQUITY_DAILY;
/// assert_eq!(daily.periods_per_year(1.0), 252.0);
/// assert_eq!(daily.periods_per_year(0.5), 504.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConvention"))]
pub struct TradingConvention {
    trading_periods_per_year: f64,
}

/// Unchecked wire form; deserialisation goes through [`TradingConvention::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConvention {
    trading_periods_per_year: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConvention> for TradingConvention {
    type Error = SimulationError;

    fn try_from(raw: RawConvention) -> Result<Self> {
        Self::new(raw.trading_periods_per_year)
    }
}

impl TradingConvention {
    /// Equity markets: 252 trading days per year.
    pub const EQUITY_DAILY: Self = Self {
        trading_periods_per_year: 252.0,
    };

    /// Markets trading every calendar day.
    pub const CALENDAR_DAILY: Self = Self {
        trading_periods_per_year: 365.0,
    };

    /// Weekly periods.
    pub const WEEKLY: Self = Self {
        trading_periods_per_year: 52.0,
    };

    /// Monthly periods.
    pub const MONTHLY: Self = Self {
        trading_periods_per_year: 12.0,
    };

    /// Creates a custom convention.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ConfigValidation`] unless the count is
    /// finite and positive.
    pub fn new(trading_periods_per_year: f64) -> Result<Self> {
        if trading_periods_per_year.is_finite() && trading_periods_per_year > 0.0 {
            Ok(Self {
                trading_periods_per_year,
            })
        } else {
            Err(SimulationError::config(
                "trading_periods_per_year",
                format!("must be finite and positive, got {}", trading_periods_per_year),
            ))
        }
    }

    /// Resolves a named convention (`equity`, `calendar`, `weekly`, `monthly`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "equity" | "equity_daily" | "trading_days" => Some(Self::EQUITY_DAILY),
            "calendar" | "calendar_daily" | "crypto" => Some(Self::CALENDAR_DAILY),
            "weekly" => Some(Self::WEEKLY),
            "monthly" => Some(Self::MONTHLY),
            _ => None,
        }
    }

    /// Trading periods of unit length per year.
    #[inline]
    pub fn trading_periods_per_year(&self) -> f64 {
        self.trading_periods_per_year
    }

    /// Path steps of size `dt` per year.
    #[inline]
    pub fn periods_per_year(&self, dt: f64) -> f64 {
        self.trading_periods_per_year / dt
    }
}

impl Default for TradingConvention {
    fn default() -> Self {
        Self::EQUITY_DAILY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_equity() {
        assert_eq!(TradingConvention::default(), TradingConvention::EQUITY_DAILY);
        assert_eq!(TradingConvention::default().trading_periods_per_year(), 252.0);
    }

    #[test]
    fn test_custom_convention() {
        let c = TradingConvention::new(260.0).unwrap();
        assert_eq!(c.periods_per_year(2.0), 130.0);

        assert!(TradingConvention::new(0.0).is_err());
        assert!(TradingConvention::new(-1.0).is_err());
        assert!(TradingConvention::new(f64::NAN).is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            TradingConvention::from_name("Equity"),
            Some(TradingConvention::EQUITY_DAILY)
        );
        assert_eq!(
            TradingConvention::from_name("crypto"),
            Some(TradingConvention::CALENDAR_DAILY)
        );
        assert_eq!(TradingConvention::from_name("hourly"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_validates() {
        let c: TradingConvention =
            serde_json::from_str(r#"{"trading_periods_per_year": 260.0}"#).unwrap();
        assert_eq!(c.trading_periods_per_year(), 260.0);

        for bad in ["-252.0", "0.0"] {
            let json = format!(r#"{{"trading_periods_per_year": {}}}"#, bad);
            let err = serde_json::from_str::<TradingConvention>(&json).unwrap_err();
            assert!(err.to_string().contains("trading_periods_per_year"));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialised_shape() {
        let json = serde_json::to_string(&TradingConvention::WEEKLY).unwrap();
        assert_eq!(json, r#"{"trading_periods_per_year":52.0}"#);
        let back: TradingConvention = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TradingConvention::WEEKLY);
    }
}
