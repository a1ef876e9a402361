//! Incremental statistics for a run

use super::types::AggregateStats;
use crate::run::CallResult;

/// Folds call results into running tallies
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    stats: AggregateStats,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call result
    pub fn record(&mut self, result: &CallResult) {
        let tally = self
            .stats
            .category_stats
            .entry(result.expected_outcome)
            .or_default();

        if result.success {
            self.stats.success_count += 1;
            tally.success += 1;
        } else {
            self.stats.failure_count += 1;
            tally.failure += 1;
        }
        self.stats.total_elapsed_ms += result.elapsed_ms;
    }

    /// Current statistics
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        self.stats = AggregateStats::default();
    }

    pub fn into_stats(self) -> AggregateStats {
        self.stats
    }
}
