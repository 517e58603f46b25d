//! Batch results.

use synth_core::types::{ClampStats, Metrics, Path};

/// Result of one path: the states, their metrics and guardrail counters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathReport {
    /// Index of the path within its batch.
    pub path_index: u64,
    /// Generated states, `num_steps + 1` long.
    pub path: Path,
    /// Metrics computed from `path`.
    pub metrics: Metrics,
    /// Guardrail counters.
    pub clamp_stats: ClampStats,
}

/// Aggregates over every path of a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Number of paths aggregated.
    pub num_paths: usize,
    /// Mean of terminal prices.
    pub mean_terminal_price: f64,
    /// Mean of annualised volatilities.
    pub mean_annualized_volatility: f64,
    /// Largest max drawdown over all paths.
    pub worst_max_drawdown: f64,
    /// Steps altered by a guardrail, summed over paths.
    pub total_clamp_events: u64,
    /// Per-rule guardrail counters summed over paths.
    pub clamp_stats: ClampStats,
}

impl BatchSummary {
    /// Aggregates `reports` in order.
    pub fn from_reports(reports: &[PathReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }

        let n = reports.len() as f64;
        let mut terminal_sum = 0.0;
        let mut vol_sum = 0.0;
        let mut worst_max_drawdown: f64 = 0.0;
        let mut clamp_stats = ClampStats::default();

        for report in reports {
            terminal_sum += report.metrics.terminal_price;
            vol_sum += report.metrics.annualized_volatility;
            worst_max_drawdown = worst_max_drawdown.max(report.metrics.max_drawdown);
            clamp_stats.merge(&report.clamp_stats);
        }

        Self {
            num_paths: reports.len(),
            mean_terminal_price: terminal_sum / n,
            mean_annualized_volatility: vol_sum / n,
            worst_max_drawdown,
            total_clamp_events: clamp_stats.total(),
            clamp_stats,
        }
    }
}

/// Output of a batch run, ordered by path index.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// One report per path, `reports[i].path_index == i`.
    pub reports: Vec<PathReport>,
    /// Batch aggregates.
    pub summary: BatchSummary,
}

impl SimulationReport {
    /// Builds a report and its summary from ordered path reports.
    pub fn from_reports(reports: Vec<PathReport>) -> Self {
        let summary = BatchSummary::from_reports(&reports);
        Self { reports, summary }
    }

    /// Number of paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns `true` if no path was run.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Report of path `path_index`, if it was part of the batch.
    #[inline]
    pub fn get(&self, path_index: u64) -> Option<&PathReport> {
        usize::try_from(path_index)
            .ok()
            .and_then(|i| self.reports.get(i))
    }
}
