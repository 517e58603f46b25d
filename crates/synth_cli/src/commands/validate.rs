//! Validate command implementation
//!
//! Resolves and validates the configuration without running anything, then
//! prints the effective configuration as TOML.

use tracing::info;

use crate::config::ServiceConfig;
use crate::Result;

/// Render the resolved configuration
pub fn render(config: &ServiceConfig) -> Result<String> {
    config.resolve()?;
    Ok(toml::to_string_pretty(config)?)
}

/// Run the validate command
pub fn run(config: &ServiceConfig) -> Result<()> {
    let rendered = render(config)?;
    info!("Configuration is valid");
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_round_trips() {
        let mut config = ServiceConfig::default();
        config.simulation.seed = 5;
        let text = render(&config).unwrap();
        assert!(text.contains("[simulation]"));
        assert_eq!(ServiceConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_render_seed_above_i64_max() {
        for seed in [i64::MAX as u64, i64::MAX as u64 + 1, u64::MAX] {
            let mut config = ServiceConfig::default();
            config.simulation.seed = seed;
            let text = render(&config).unwrap();
            let back = ServiceConfig::from_toml_str(&text).unwrap();
            assert_eq!(back.simulation.seed, seed);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ServiceConfig::default();
        config.runner.num_paths = 0;
        assert!(render(&config).is_err());
    }
}
