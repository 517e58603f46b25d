//! Simulate command implementation
//!
//! Runs a batch from the resolved configuration and renders the results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path as FilePath;
use tracing::info;

use synth_core::config::SimulationParams;
use synth_core::types::{ClampStats, Path};
use synth_engine::runner::{BatchSummary, PathReport, SimulationRunner};

use crate::config::{OutputFormat, ServiceConfig};
use crate::Result;

/// Per-path section of the output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathOutput {
    /// Index of the path within the batch
    pub path_index: u64,
    /// Final price
    pub terminal_price: f64,
    /// Annualised volatility of log returns
    pub annualized_volatility: f64,
    /// Largest peak-to-trough decline
    pub max_drawdown: f64,
    /// `ln(terminal / initial)`
    pub cumulative_log_return: f64,
    /// Guardrail counters
    pub clamp_stats: ClampStats,
    /// Full state sequence, only with `--include-paths`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Path>,
}

impl PathOutput {
    fn from_report(report: PathReport, include_states: bool) -> Self {
        Self {
            path_index: report.path_index,
            terminal_price: report.metrics.terminal_price,
            annualized_volatility: report.metrics.annualized_volatility,
            max_drawdown: report.metrics.max_drawdown,
            cumulative_log_return: report.metrics.cumulative_log_return(),
            clamp_stats: report.clamp_stats,
            states: include_states.then_some(report.path),
        }
    }
}

/// Document produced by `simulate`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    /// Wall-clock time of the run
    pub generated_at: DateTime<Utc>,
    /// Parameters the batch ran with
    pub simulation: SimulationParams,
    /// Batch aggregates
    pub summary: BatchSummary,
    /// Per-path results in index order
    pub paths: Vec<PathOutput>,
}

/// Run the batch described by `config`
pub fn execute(config: &ServiceConfig, include_paths: bool) -> Result<SimulationOutput> {
    let (simulation, runner_config) = config.resolve()?;
    let runner = SimulationRunner::new(simulation, runner_config)?;
    let report = runner.run()?;

    let summary = report.summary;
    let paths = report
        .reports
        .into_iter()
        .map(|r| PathOutput::from_report(r, include_paths))
        .collect();

    Ok(SimulationOutput {
        generated_at: Utc::now(),
        simulation: config.simulation.clone(),
        summary,
        paths,
    })
}

/// Render `output` in the requested format
pub fn render(output: &SimulationOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Table => Ok(render_table(output)),
    }
}

fn render_table(output: &SimulationOutput) -> String {
    const TOP: &str = "┌────────┬──────────────┬──────────────┬──────────────┬──────────┐";
    const HEADER: &str = "│ Path   │ Terminal     │ Ann. Vol     │ Max DD       │ Clamps   │";
    const RULE: &str = "├────────┼──────────────┼──────────────┼──────────────┼──────────┤";
    const BOTTOM: &str = "└────────┴──────────────┴──────────────┴──────────────┴──────────┘";

    let row = |label: String, terminal: f64, vol: f64, dd: f64, clamps: u64| {
        format!(
            "│ {:<6} │ {:>12.4} │ {:>12.6} │ {:>12.6} │ {:>8} │",
            label, terminal, vol, dd, clamps
        )
    };

    let mut lines = vec![TOP.to_string(), HEADER.to_string(), RULE.to_string()];
    lines.extend(output.paths.iter().map(|p| {
        row(
            p.path_index.to_string(),
            p.terminal_price,
            p.annualized_volatility,
            p.max_drawdown,
            p.clamp_stats.total(),
        )
    }));

    let s = &output.summary;
    lines.push(RULE.to_string());
    lines.push(row(
        format!("n={}", s.num_paths),
        s.mean_terminal_price,
        s.mean_annualized_volatility,
        s.worst_max_drawdown,
        s.total_clamp_events,
    ));
    lines.push(BOTTOM.to_string());
    lines.join("\n")
}

/// Run the simulate command
pub fn run(config: &ServiceConfig, include_paths: bool, output_file: Option<&FilePath>) -> Result<()> {
    info!(
        seed = config.simulation.seed,
        num_steps = config.simulation.num_steps,
        num_paths = config.runner.num_paths,
        format = %config.output,
        "Starting simulation"
    );

    let output = execute(config, include_paths)?;
    let rendered = render(&output, config.output)?;

    match output_file {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(path = %path.display(), "Results written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
