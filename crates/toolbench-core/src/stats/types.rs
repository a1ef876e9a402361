//! Statistics types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::prompts::ExpectedOutcome;

/// Pass rate over a set of attempts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PassRate {
    /// No attempts were made
    NotApplicable,
    /// Percentage in `[0, 100]`
    Percent(f64),
}

impl PassRate {
    pub fn from_counts(success: usize, failure: usize) -> Self {
        let attempts = success + failure;
        if attempts == 0 {
            PassRate::NotApplicable
        } else {
            PassRate::Percent(success as f64 / attempts as f64 * 100.0)
        }
    }
}

impl std::fmt::Display for PassRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassRate::NotApplicable => write!(f, "N/A"),
            PassRate::Percent(value) => write!(f, "{:.2}%", value),
        }
    }
}

/// Success and failure counts of one expected-outcome category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub success: usize,
    pub failure: usize,
}

impl CategoryTally {
    pub fn attempts(&self) -> usize {
        self.success + self.failure
    }

    pub fn pass_rate(&self) -> PassRate {
        PassRate::from_counts(self.success, self.failure)
    }
}

/// Running statistics of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub success_count: usize,
    pub failure_count: usize,
    /// Sum of engine-measured call durations
    pub total_elapsed_ms: f64,
    pub category_stats: BTreeMap<ExpectedOutcome, CategoryTally>,
}

impl AggregateStats {
    /// Number of results recorded
    pub fn processed(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Mean call duration, `None` before the first result
    pub fn average_elapsed_ms(&self) -> Option<f64> {
        match self.processed() {
            0 => None,
            processed => Some(self.total_elapsed_ms / processed as f64),
        }
    }

    pub fn pass_rate(&self) -> PassRate {
        PassRate::from_counts(self.success_count, self.failure_count)
    }

    /// Tally of a category; zero when nothing was attempted in it
    pub fn category(&self, outcome: ExpectedOutcome) -> CategoryTally {
        self.category_stats.get(&outcome).copied().unwrap_or_default()
    }

    pub fn category_pass_rate(&self, outcome: ExpectedOutcome) -> PassRate {
        self.category(outcome).pass_rate()
    }

    /// Rounded completion percentage against a suite of `total` prompts
    pub fn progress_percent(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        (self.processed() as f64 / total as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_rate_display() {
        assert_eq!(PassRate::from_counts(0, 0).to_string(), "N/A");
        assert_eq!(PassRate::from_counts(3, 1).to_string(), "75.00%");
        assert_eq!(PassRate::from_counts(1, 2).to_string(), "33.33%");
    }

    #[test]
    fn test_empty_stats() {
        let stats = AggregateStats::default();
        assert_eq!(stats.average_elapsed_ms(), None);
        assert_eq!(
            stats.category_pass_rate(ExpectedOutcome::NoTool),
            PassRate::NotApplicable
        );
        assert_eq!(stats.progress_percent(10), 0);
    }

    #[test]
    fn test_progress_rounding() {
        let stats = AggregateStats {
            success_count: 2,
            failure_count: 0,
            ..Default::default()
        };
        assert_eq!(stats.progress_percent(3), 67);
        assert_eq!(stats.progress_percent(0), 0);
    }
}
