//! Benchmark configuration model

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::error::{BenchError, BenchResult};
use crate::prompts::{DEFAULT_NO_TOOL_PROBABILITY, normalize_probability};
use crate::scoring::DEFAULT_SCORING_URL;

/// Default number of prompts in a generated suite
pub const DEFAULT_SUITE_SIZE: usize = 10;

/// Endpoint and model identifier of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Model endpoint URL
    #[serde(default, alias = "base_url")]
    pub endpoint: String,
    /// Model identifier at the endpoint
    #[serde(default, alias = "model_name")]
    pub model: String,
}

impl RunConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Both endpoint and model are non-blank
    pub fn is_complete(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.model.trim().is_empty()
    }

    /// Copy with surrounding whitespace removed from both fields
    pub fn trimmed(&self) -> Self {
        Self::new(self.endpoint.trim(), self.model.trim())
    }
}

/// Prompt suite generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Number of prompts to generate
    pub size: usize,
    /// Probability that a generated prompt expects no tool call
    pub no_tool_probability: f64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SUITE_SIZE,
            no_tool_probability: DEFAULT_NO_TOOL_PROBABILITY,
        }
    }
}

/// Top-level benchmark configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Scoring service endpoint
    #[serde(default = "default_scoring_url")]
    pub scoring_url: String,

    /// Primary run (required)
    #[serde(default)]
    pub primary: RunConfig,

    /// Secondary run (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<RunConfig>,

    /// Suite generation settings
    #[serde(default)]
    pub suite: SuiteConfig,

    /// Record per-call log entries
    #[serde(default = "default_enable_logging")]
    pub enable_logging: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_scoring_url() -> String {
    DEFAULT_SCORING_URL.to_string()
}

fn default_enable_logging() -> bool {
    true
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            scoring_url: default_scoring_url(),
            primary: RunConfig::default(),
            secondary: None,
            suite: SuiteConfig::default(),
            enable_logging: default_enable_logging(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Secondary run if it is fully configured
    pub fn effective_secondary(&self) -> Option<RunConfig> {
        self.secondary
            .as_ref()
            .filter(|config| config.is_complete())
            .map(RunConfig::trimmed)
    }

    /// Clamp the no-tool probability into [0, 1]
    pub fn normalize(&mut self) {
        self.suite.no_tool_probability = normalize_probability(self.suite.no_tool_probability);
    }

    /// Check everything that must hold before a benchmark starts
    pub fn validate(&self) -> BenchResult<()> {
        if self.scoring_url.trim().is_empty() {
            return Err(BenchError::config("Scoring service URL must not be empty"));
        }

        if self.primary.endpoint.trim().is_empty() {
            return Err(BenchError::config("Primary run needs an endpoint URL"));
        }
        if self.primary.model.trim().is_empty() {
            return Err(BenchError::config("Primary run needs a model identifier"));
        }

        if self.suite.size == 0 {
            return Err(BenchError::validation(
                "Suite size must be a positive integer",
            ));
        }

        self.logging.validate()
    }
}
