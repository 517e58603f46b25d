//! Integration tests from a config file on disk to rendered results.

use approx::assert_relative_eq;
use std::path::PathBuf;

use synth_cli::commands::{simulate, validate};
use synth_cli::config::{build_config_with_env, CliArgs, ConfigError, OutputFormat};
use synth_cli::CliError;

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("synth_cli_{}_{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

const CALM: &str = r#"
output = "table"

[simulation]
seed = 42
num_steps = 5
dt = 1.0
initial_price = 110.0
mean_reversion_level = 100.0
mean_reversion_rate = 0.1
momentum_damping = 0.2
noise_scale = 0.0
max_step_jump = 50.0

[runner]
num_paths = 3
"#;

#[test]
fn file_config_drives_simulation() {
    let path = write_config("calm", CALM);
    let cli = CliArgs {
        config_file: Some(path.clone()),
        ..CliArgs::default()
    };
    let config = build_config_with_env(&cli, &no_env).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.output, OutputFormat::Table);
    let output = simulate::execute(&config, false).unwrap();

    // No noise: every path is the same deterministic reversion
    assert_eq!(output.paths.len(), 3);
    for p in &output.paths {
        assert_relative_eq!(p.terminal_price, 100.9609, epsilon = 1e-9);
        assert_eq!(p.clamp_stats.total(), 0);
    }
    assert_relative_eq!(output.summary.mean_terminal_price, 100.9609, epsilon = 1e-9);
}

#[test]
fn cli_overrides_file() {
    let path = write_config("override", CALM);
    let cli = CliArgs {
        config_file: Some(path.clone()),
        num_paths: Some(7),
        output: Some(OutputFormat::Json),
        ..CliArgs::default()
    };
    let config = build_config_with_env(&cli, &no_env).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.runner.num_paths, 7);
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.simulation.initial_price, 110.0);
}

#[test]
fn invalid_file_values_rejected() {
    let path = write_config(
        "invalid",
        "[simulation]\nnum_steps = 5\nmomentum_damping = 1.5\n",
    );
    let cli = CliArgs {
        config_file: Some(path.clone()),
        ..CliArgs::default()
    };
    let result = build_config_with_env(&cli, &no_env);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn missing_file_reported() {
    let cli = CliArgs {
        config_file: Some(PathBuf::from("/nonexistent/synth.toml")),
        ..CliArgs::default()
    };
    let err = build_config_with_env(&cli, &no_env).unwrap_err();
    assert!(matches!(err, ConfigError::FileError(_)));

    let cli_err: CliError = err.into();
    assert!(cli_err.to_string().starts_with("Configuration error:"));
}

#[test]
fn repeated_runs_render_identically() {
    let mut config = build_config_with_env(&CliArgs::default(), &no_env).unwrap();
    config.simulation.seed = 11;
    config.simulation.num_steps = 50;
    config.runner.num_paths = 40;
    config.runner.min_paths_for_parallel = 4;

    let a = simulate::execute(&config, true).unwrap();
    config.runner.parallel = false;
    let b = simulate::execute(&config, true).unwrap();

    assert_eq!(a.paths, b.paths);
    assert_eq!(a.summary, b.summary);
    assert_eq!(
        simulate::render(&a, OutputFormat::Table).unwrap(),
        simulate::render(&b, OutputFormat::Table).unwrap()
    );
}

#[test]
fn validate_prints_resolved_config() {
    let config = build_config_with_env(
        &CliArgs {
            seed: Some(3),
            ..CliArgs::default()
        },
        &|var| (var == "SYNTH_NUM_PATHS").then(|| "12".to_string()),
    )
    .unwrap();

    let text = validate::render(&config).unwrap();
    assert!(text.contains("seed = 3"));
    assert!(text.contains("num_paths = 12"));
}
