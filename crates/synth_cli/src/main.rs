//! Synthetic market simulator CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synth_cli::commands;
use synth_cli::config::{build_config, CliArgs, LogLevel, OutputFormat};
use synth_cli::Result;

/// Deterministic synthetic market simulator
#[derive(Parser, Debug)]
#[command(name = "synth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "SYNTH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SYNTH_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a batch of paths and print the results
    Simulate {
        /// Top-level seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Steps per path
        #[arg(long)]
        num_steps: Option<usize>,

        /// Number of paths
        #[arg(short, long)]
        num_paths: Option<usize>,

        /// Size of a dedicated worker pool
        #[arg(short = 't', long)]
        threads: Option<usize>,

        /// Run every path on the calling thread
        #[arg(long)]
        sequential: bool,

        /// Output format (json, table)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Include every state of every path in JSON output
        #[arg(long)]
        include_paths: bool,

        /// Write results to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and print it
    Validate,

    /// Check system configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut args = CliArgs {
        config_file: cli.config,
        log_level: cli.log_level,
        ..CliArgs::default()
    };

    match cli.command {
        Commands::Check => {
            init_tracing(args.log_level.unwrap_or_default().as_filter_str());
            commands::check::run()
        }
        Commands::Validate => {
            let config = build_config(&args)?;
            init_tracing(config.log_level.as_filter_str());
            commands::validate::run(&config)
        }
        Commands::Simulate {
            seed,
            num_steps,
            num_paths,
            threads,
            sequential,
            format,
            include_paths,
            output,
        } => {
            args.seed = seed;
            args.num_steps = num_steps;
            args.num_paths = num_paths;
            args.num_threads = threads;
            args.sequential = sequential;
            args.output = format;

            let config = build_config(&args)?;
            init_tracing(config.log_level.as_filter_str());
            info!(
                version = env!("CARGO_PKG_VERSION"),
                log_level = %config.log_level,
                "synth configuration loaded"
            );
            commands::simulate::run(&config, include_paths, output.as_deref())
        }
    }
}
