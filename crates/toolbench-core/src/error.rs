//! Error types for toolbench

use thiserror::Error;

use crate::run::RunState;

/// Result type alias for toolbench operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Main error type for the benchmark engine
///
/// Per-call scoring failures are not errors: they are recorded as failed
/// [`CallResult`](crate::run::CallResult)s and never surface through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Missing or incomplete run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input (suite size, prompt index, probability file values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A controller command issued in a state that does not allow it
    #[error("Invalid run state: expected {expected}, found {actual}")]
    InvalidState {
        expected: RunState,
        actual: RunState,
    },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),
}

impl BenchError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Whether the error was raised before any run was entered
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

impl From<std::io::Error> for BenchError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(error: reqwest::Error) -> Self {
        match error.url() {
            Some(url) => Self::http(format!("{} ({})", error, url)),
            None => Self::http(error.to_string()),
        }
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML config: {}", error))
    }
}

impl From<serde_yaml::Error> for BenchError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML config: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BenchError::config("primary run needs a model");
        assert_eq!(
            err.to_string(),
            "Configuration error: primary run needs a model"
        );

        let err = BenchError::InvalidState {
            expected: RunState::Idle,
            actual: RunState::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Invalid run state: expected idle, found completed"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(BenchError::validation("bad size").is_validation());
        assert!(BenchError::config("missing").is_validation());
        assert!(!BenchError::http("refused").is_validation());
    }

    #[test]
    fn test_from_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: BenchError = parse.unwrap_err().into();
        assert!(matches!(err, BenchError::Json(_)));
    }
}
