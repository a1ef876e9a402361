//! Configuration loading from files and environment variables

use std::fs;
use std::path::Path;

use super::model::{BenchConfig, RunConfig};
use crate::error::{BenchError, BenchResult};
use crate::prompts::parse_suite_size;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> BenchResult<BenchConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(BenchConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        BenchError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content).map_err(|e| {
            BenchError::config(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        })?,
    };

    Ok(config)
}

/// Apply `TOOLBENCH_*` overrides from the process environment
pub fn apply_env(config: &mut BenchConfig) -> BenchResult<()> {
    apply_env_with(config, |key| std::env::var(key).ok())
}

/// Apply `TOOLBENCH_*` overrides read through `lookup`
pub fn apply_env_with<F>(config: &mut BenchConfig, lookup: F) -> BenchResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("TOOLBENCH_SCORING_URL") {
        config.scoring_url = url;
    }

    if let Some(endpoint) = lookup("TOOLBENCH_PRIMARY_ENDPOINT") {
        config.primary.endpoint = endpoint;
    }
    if let Some(model) = lookup("TOOLBENCH_PRIMARY_MODEL") {
        config.primary.model = model;
    }

    let secondary_endpoint = lookup("TOOLBENCH_SECONDARY_ENDPOINT");
    let secondary_model = lookup("TOOLBENCH_SECONDARY_MODEL");
    if secondary_endpoint.is_some() || secondary_model.is_some() {
        let secondary = config.secondary.get_or_insert_with(RunConfig::default);
        if let Some(endpoint) = secondary_endpoint {
            secondary.endpoint = endpoint;
        }
        if let Some(model) = secondary_model {
            secondary.model = model;
        }
    }

    if let Some(size) = lookup("TOOLBENCH_SUITE_SIZE") {
        config.suite.size = parse_suite_size(&size)?;
    }

    if let Some(probability) = lookup("TOOLBENCH_NO_TOOL_PROBABILITY") {
        let probability: f64 = probability.trim().parse().map_err(|_| {
            BenchError::config(format!(
                "Invalid TOOLBENCH_NO_TOOL_PROBABILITY value '{}'",
                probability
            ))
        })?;
        config.suite.no_tool_probability = probability;
    }

    if let Some(enabled) = lookup("TOOLBENCH_ENABLE_LOGGING") {
        config.enable_logging = parse_flag(&enabled).ok_or_else(|| {
            BenchError::config(format!(
                "Invalid TOOLBENCH_ENABLE_LOGGING value '{}'",
                enabled
            ))
        })?;
    }

    if let Some(level) = lookup("TOOLBENCH_LOG_LEVEL") {
        config.logging.level = level;
    }

    config.normalize();
    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
