//! Prompt record types

use serde::{Deserialize, Serialize};

/// Ground-truth outcome a correct model response should exhibit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpectedOutcome {
    /// The model should answer conversationally without calling a tool
    #[serde(rename = "none", alias = "no_tool", alias = "no-tool")]
    NoTool,
    /// The model should call the weather-lookup tool
    #[serde(rename = "get_current_weather", alias = "tool")]
    Tool,
}

impl ExpectedOutcome {
    /// Name sent to the scoring service as `expected_tool`
    pub fn wire_name(&self) -> &'static str {
        match self {
            ExpectedOutcome::NoTool => "none",
            ExpectedOutcome::Tool => "get_current_weather",
        }
    }

    /// Get display name for this outcome
    pub fn display_name(&self) -> &'static str {
        match self {
            ExpectedOutcome::NoTool => "None",
            ExpectedOutcome::Tool => "Tool",
        }
    }

    /// Get all outcomes
    pub fn all() -> &'static [ExpectedOutcome] {
        &[ExpectedOutcome::Tool, ExpectedOutcome::NoTool]
    }

    /// Parse from a wire or display name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "no_tool" | "no-tool" => Some(ExpectedOutcome::NoTool),
            "tool" | "get_current_weather" => Some(ExpectedOutcome::Tool),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single natural-language test input with its expected-outcome label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Ordinal position within the owning set
    #[serde(default)]
    pub id: usize,

    /// Prompt text sent to the model
    #[serde(rename = "sentence", alias = "text")]
    pub text: String,

    /// Expected outcome
    #[serde(rename = "expected_tool", alias = "expected_outcome")]
    pub expected_outcome: ExpectedOutcome,
}

impl PromptRecord {
    /// Create a new prompt record
    pub fn new(id: usize, text: impl Into<String>, expected_outcome: ExpectedOutcome) -> Self {
        Self {
            id,
            text: text.into(),
            expected_outcome,
        }
    }

    /// 1-based number used in user-facing output
    pub fn number(&self) -> usize {
        self.id + 1
    }
}
