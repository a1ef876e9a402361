//! Run identifiers and lifecycle states

use serde::{Deserialize, Serialize};

/// Which of the two benchmark runs an event or result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunId {
    Primary,
    Secondary,
}

impl RunId {
    /// 1-based run number used by interactive commands and log entries
    pub fn number(&self) -> usize {
        match self {
            RunId::Primary => 1,
            RunId::Secondary => 2,
        }
    }

    /// Look up a run by its 1-based number
    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(RunId::Primary),
            2 => Some(RunId::Secondary),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model {}", self.number())
    }
}

/// Lifecycle state of a run
///
/// `Idle → Running ⇄ Paused → {Stopped | Completed}`. Both terminal states
/// are irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
    Completed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Stopped | RunState::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
            RunState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
