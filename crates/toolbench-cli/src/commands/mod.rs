//! Command implementations

pub mod generate;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use toolbench_core::config::{self, BenchConfig};
use toolbench_core::prompts::{PromptGenerator, PromptSet, parse_suite_size};

use crate::args::SuiteArgs;

/// Load the config file, then environment overrides, then suite flags
pub(crate) fn load_config(config_file: &str, suite: &SuiteArgs) -> Result<BenchConfig> {
    let mut config = config::load_from_file(Path::new(config_file))
        .with_context(|| format!("Failed to load configuration from '{}'", config_file))?;
    config::apply_env(&mut config)?;

    if let Some(count) = &suite.count {
        config.suite.size = parse_suite_size(count)?;
    }
    if let Some(probability) = suite.no_tool_probability {
        config.suite.no_tool_probability = probability;
    }
    config.normalize();

    Ok(config)
}

/// Generate a suite from the configured size and probability
pub(crate) fn generate_suite(config: &BenchConfig, seed: Option<u64>) -> Result<PromptSet> {
    let mut generator = match seed {
        Some(seed) => PromptGenerator::seeded(seed),
        None => PromptGenerator::new(),
    };

    let mut prompts = PromptSet::new();
    prompts.regenerate(
        &mut generator,
        config.suite.size,
        config.suite.no_tool_probability,
    )?;
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_suite_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("toolbench.toml");
        std::fs::write(&path, "[suite]\nsize = 30\nno_tool_probability = 0.5\n").unwrap();

        let suite = SuiteArgs {
            count: Some("12".to_string()),
            no_tool_probability: Some(-1.0),
            seed: None,
        };
        let config = load_config(path.to_str().unwrap(), &suite).unwrap();
        assert_eq!(config.suite.size, 12);
        assert_eq!(config.suite.no_tool_probability, 0.0);
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let suite = SuiteArgs {
            count: Some("0".to_string()),
            no_tool_probability: None,
            seed: None,
        };
        assert!(load_config(path.to_str().unwrap(), &suite).is_err());
    }

    #[test]
    fn test_seeded_suite_is_reproducible() {
        let config = BenchConfig::default();
        let first = generate_suite(&config, Some(7)).unwrap();
        let second = generate_suite(&config, Some(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }
}
