//! Toolbench Core Library
//!
//! This crate provides the benchmark execution engine for comparing how two
//! model endpoints handle tool-calling decisions: prompt suite generation,
//! the scoring-service client, pausable runs, live statistics, the call log,
//! and report rendering.

pub mod config;
pub mod error;
pub mod log_sink;
pub mod orchestrator;
pub mod prompts;
pub mod report;
pub mod run;
pub mod scoring;
pub mod stats;

// Re-export commonly used types
pub use config::{BenchConfig, LoggingConfig, RunConfig, SuiteConfig};
pub use error::{BenchError, BenchResult};
pub use log_sink::{LogEntry, LogFilter, LogSink};
pub use orchestrator::{BenchmarkEvent, BenchmarkOrchestrator, BenchmarkSession};
pub use prompts::{ExpectedOutcome, PromptGenerator, PromptRecord, PromptSet};
pub use report::{BenchmarkReport, ReportFormat, RunReport, generate_report};
pub use run::{CallResult, RunController, RunEvent, RunHandle, RunId, RunOutcome, RunState};
pub use scoring::{HttpScoringClient, ScoringClient, ScoringRequest, ScoringResponse};
pub use stats::{AggregateStats, CategoryTally, PassRate, StatsAggregator};
