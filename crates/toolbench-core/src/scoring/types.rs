//! Wire types exchanged with the scoring service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::RunConfig;
use crate::prompts::{ExpectedOutcome, PromptRecord};

/// One scoring request: a prompt evaluated against one model endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    /// Model endpoint the scoring service should call
    pub base_url: String,
    /// Model identifier at that endpoint
    pub model_name: String,
    /// Prompt text
    pub sentence: String,
    /// Ground-truth outcome for the prompt
    pub expected_tool: ExpectedOutcome,
}

impl ScoringRequest {
    /// Build the request for a prompt under a run configuration
    pub fn new(config: &RunConfig, prompt: &PromptRecord) -> Self {
        Self {
            base_url: config.endpoint.clone(),
            model_name: config.model.clone(),
            sentence: prompt.text.clone(),
            expected_tool: prompt.expected_outcome,
        }
    }
}

/// A tool invocation the model made while answering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallObservation {
    /// Tool name
    pub name: String,
    /// Arguments the model supplied
    #[serde(default)]
    pub args: Value,
    /// Tool output, or the execution error text
    #[serde(default)]
    pub output: String,
}

/// Response body of the scoring service
///
/// Unknown fields are kept in `extra` so log entries carry the full payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringResponse {
    /// Whether the model handled the prompt successfully
    #[serde(default)]
    pub success: bool,

    /// Echo of the prompt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,

    /// Tool calls observed in the model response
    #[serde(default)]
    pub tool_calls: Vec<ToolCallObservation>,

    /// Conversational text of the model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_response: Option<String>,

    /// Failure description signalled by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Service-reported processing time in milliseconds
    #[serde(
        default,
        alias = "elapsed_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_taken: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoringResponse {
    /// A successful response with conversational text
    pub fn success(model_response: impl Into<String>) -> Self {
        Self {
            success: true,
            model_response: Some(model_response.into()),
            ..Default::default()
        }
    }

    /// A failed response with an error description
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attach a service-reported timing
    pub fn with_time_taken(mut self, millis: f64) -> Self {
        self.time_taken = Some(millis);
        self
    }

    /// Full payload as JSON for logging
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
