//! Benchmark report types

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{BenchError, BenchResult};
use crate::log_sink::LogSink;
use crate::run::{RunId, RunState};
use crate::stats::AggregateStats;

/// Final result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run: RunId,
    pub endpoint: String,
    pub model: String,
    pub state: RunState,
    /// Prompts scored before the run ended
    pub attempted: usize,
    pub stats: AggregateStats,
}

impl RunReport {
    /// Whether the run was stopped before exhausting the suite
    pub fn stopped_early(&self, total_prompts: usize) -> bool {
        self.attempted < total_prompts
    }
}

/// Outcome of a whole benchmark
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Wall-clock time from the first run starting to the last run ending
    pub total_elapsed_ms: f64,
    pub total_prompts: usize,
    pub runs: Vec<RunReport>,
    pub log: LogSink,
}

impl BenchmarkReport {
    pub fn run(&self, id: RunId) -> Option<&RunReport> {
        self.runs.iter().find(|report| report.run == id)
    }

    /// Write the report as pretty JSON
    pub fn save_json(&self, path: &Path) -> BenchResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            BenchError::io(format!(
                "Failed to write report '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
