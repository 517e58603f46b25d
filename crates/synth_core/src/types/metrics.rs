//! Risk metrics and guardrail audit records.

/// Risk/return figures derived from one completed path.
///
/// # Examples
///
/// ```rust
/// use synth_core::types::Metrics;
///
/// let metrics = Metrics {
///     log_returns: vec![0.01, -0.02],
///     annualized_volatility: 0.34,
///     max_drawdown: 0.02,
///     terminal_price: 99.0,
/// };
/// assert_eq!(metrics.num_returns(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// `ln(price[i+1] / price[i])` for every step.
    pub log_returns: Vec<f64>,
    /// Sample standard deviation of log returns scaled to one year.
    pub annualized_volatility: f64,
    /// Largest peak-to-trough decline as a fraction of the peak, in [0, 1].
    pub max_drawdown: f64,
    /// Price of the final state.
    pub terminal_price: f64,
}

impl Metrics {
    /// Number of log returns (equal to the number of path steps).
    #[inline]
    pub fn num_returns(&self) -> usize {
        self.log_returns.len()
    }

    /// Sum of log returns, i.e. `ln(terminal / initial)`.
    #[inline]
    pub fn cumulative_log_return(&self) -> f64 {
        self.log_returns.iter().sum()
    }
}

/// Which guardrail rule(s) altered a proposed transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClampKind {
    /// Transition accepted unchanged.
    #[default]
    None,
    /// Price raised to the floor.
    Floor,
    /// Price delta capped at the maximum step jump.
    Jump,
    /// Floor applied first, then the jump cap.
    FloorAndJump,
}

impl ClampKind {
    /// Returns `true` if any rule fired.
    #[inline]
    pub fn is_clamped(&self) -> bool {
        !matches!(self, ClampKind::None)
    }

    /// Combines the outcome of the floor rule and the jump rule.
    #[inline]
    pub fn from_flags(floor: bool, jump: bool) -> Self {
        match (floor, jump) {
            (false, false) => ClampKind::None,
            (true, false) => ClampKind::Floor,
            (false, true) => ClampKind::Jump,
            (true, true) => ClampKind::FloorAndJump,
        }
    }
}

/// Per-path clamp event counters kept for audit.
///
/// Counting never feeds back into the dynamics; the path carries only the
/// clamped values themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampStats {
    /// Steps on which the price floor engaged.
    pub floor_clamps: u64,
    /// Steps on which the step-jump cap engaged.
    pub jump_clamps: u64,
    /// Steps on which at least one rule engaged.
    pub clamped_steps: u64,
}

impl ClampStats {
    /// Records the outcome of one guardrail pass.
    #[inline]
    pub fn record(&mut self, kind: ClampKind) {
        match kind {
            ClampKind::None => return,
            ClampKind::Floor => self.floor_clamps += 1,
            ClampKind::Jump => self.jump_clamps += 1,
            ClampKind::FloorAndJump => {
                self.floor_clamps += 1;
                self.jump_clamps += 1;
            }
        }
        self.clamped_steps += 1;
    }

    /// Number of steps altered by the guardrails.
    #[inline]
    pub fn total(&self) -> u64 {
        self.clamped_steps
    }

    /// Adds another path's counters to these.
    #[inline]
    pub fn merge(&mut self, other: &ClampStats) {
        self.floor_clamps += other.floor_clamps;
        self.jump_clamps += other.jump_clamps;
        self.clamped_steps += other.clamped_steps;
    }
}
