//! Per-call results

use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::prompts::{ExpectedOutcome, PromptRecord};
use crate::scoring::{ScoringResponse, ToolCallObservation};

/// Outcome of scoring one prompt in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    /// Index of the prompt within the suite
    pub prompt_id: usize,
    /// Category the prompt belongs to
    pub expected_outcome: ExpectedOutcome,
    pub success: bool,
    /// Wall-clock time measured by the engine around the call
    pub elapsed_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallObservation>,
    /// Processing time the scoring service reported, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_elapsed_ms: Option<f64>,
}

impl CallResult {
    /// Result for a response the scoring service returned
    ///
    /// `index` is the prompt's position in the suite being run.
    pub fn from_response(
        index: usize,
        prompt: &PromptRecord,
        response: &ScoringResponse,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            prompt_id: index,
            expected_outcome: prompt.expected_outcome,
            success: response.success,
            elapsed_ms,
            response_text: response.model_response.clone(),
            error_message: response.error.clone(),
            tool_calls: response.tool_calls.clone(),
            reported_elapsed_ms: response.time_taken,
        }
    }

    /// Result for a call that never produced a scoring verdict
    pub fn transport_failure(
        index: usize,
        prompt: &PromptRecord,
        error: &BenchError,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            prompt_id: index,
            expected_outcome: prompt.expected_outcome,
            success: false,
            elapsed_ms,
            response_text: None,
            error_message: Some(error.to_string()),
            tool_calls: Vec::new(),
            reported_elapsed_ms: None,
        }
    }

    /// 1-based prompt number
    pub fn number(&self) -> usize {
        self.prompt_id + 1
    }

    /// Text to show for the call: the model reply or the failure reason
    pub fn display_text(&self) -> String {
        if self.success {
            match self.response_text.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => "No response".to_string(),
            }
        } else {
            let message = self
                .error_message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("Unknown");
            format!("Error: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> PromptRecord {
        PromptRecord::new(3, "Tell me a joke.", ExpectedOutcome::NoTool)
    }

    #[test]
    fn test_display_fallbacks() {
        let empty = ScoringResponse::success("   ");
        let result = CallResult::from_response(3, &prompt(), &empty, 12.0);
        assert_eq!(result.display_text(), "No response");
        assert_eq!(result.number(), 4);

        let failed = ScoringResponse {
            success: false,
            ..Default::default()
        };
        let result = CallResult::from_response(3, &prompt(), &failed, 12.0);
        assert_eq!(result.display_text(), "Error: Unknown");
    }

    #[test]
    fn test_transport_failure() {
        let err = BenchError::http("connection refused");
        let result = CallResult::transport_failure(3, &prompt(), &err, 4.5);
        assert!(!result.success);
        assert_eq!(result.elapsed_ms, 4.5);
        assert_eq!(result.display_text(), "Error: HTTP error: connection refused");
    }

    #[test]
    fn test_reported_time_is_kept_separately() {
        let response = ScoringResponse::success("Why did the chicken...").with_time_taken(900.0);
        let result = CallResult::from_response(3, &prompt(), &response, 50.0);
        assert_eq!(result.elapsed_ms, 50.0);
        assert_eq!(result.reported_elapsed_ms, Some(900.0));
    }
}
