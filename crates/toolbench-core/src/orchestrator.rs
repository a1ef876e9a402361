//! Benchmark orchestration
//!
//! The orchestrator turns a prompt suite and one or two run configurations
//! into a [`BenchmarkSession`]. Running the session drives every run
//! concurrently on the calling task, folds their results into per-run
//! statistics and the call log, and republishes everything on a broadcast
//! channel for presentation layers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::{BenchConfig, RunConfig};
use crate::error::{BenchError, BenchResult};
use crate::log_sink::LogSink;
use crate::prompts::{PromptRecord, PromptSet, PromptSnapshot};
use crate::report::{BenchmarkReport, RunReport};
use crate::run::{RunController, RunEvent, RunHandle, RunId};
use crate::scoring::{HttpScoringClient, ScoringClient};
use crate::stats::{AggregateStats, StatsAggregator};

/// Capacity of the presentation event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Events published while a benchmark runs
#[derive(Debug, Clone)]
pub enum BenchmarkEvent {
    /// An event emitted by one of the runs
    Run(RunEvent),
    /// Statistics of a run after a result was folded in
    StatsUpdated {
        run: RunId,
        stats: AggregateStats,
        processed: usize,
        total: usize,
        percent: u32,
    },
    /// Every run reached a terminal state
    Finished { total_elapsed_ms: f64 },
}

/// Entry point for running benchmarks against a scoring service
pub struct BenchmarkOrchestrator {
    client: Arc<dyn ScoringClient>,
    logging_enabled: bool,
    events: broadcast::Sender<BenchmarkEvent>,
}

impl BenchmarkOrchestrator {
    pub fn new(client: Arc<dyn ScoringClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            logging_enabled: false,
            events,
        }
    }

    /// Orchestrator talking to the configured scoring service over HTTP
    pub fn from_config(config: &BenchConfig) -> BenchResult<Self> {
        let client = HttpScoringClient::new(config.scoring_url.clone())?;
        Ok(Self::new(Arc::new(client)).with_logging(config.enable_logging))
    }

    /// Enable or disable the per-call log
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Subscribe to benchmark events
    ///
    /// Slow subscribers may miss events; statistics in the final report do
    /// not depend on this channel.
    pub fn subscribe(&self) -> broadcast::Receiver<BenchmarkEvent> {
        self.events.subscribe()
    }

    /// Validate inputs and set up fresh runs
    ///
    /// The suite is snapshotted here: later edits to `prompts` do not reach
    /// the session. An absent or incomplete secondary configuration yields
    /// a single run.
    pub fn prepare(
        &self,
        prompts: &PromptSet,
        primary: &RunConfig,
        secondary: Option<&RunConfig>,
    ) -> BenchResult<BenchmarkSession> {
        if !primary.is_complete() {
            return Err(BenchError::config(
                "Primary run needs both an endpoint URL and a model identifier",
            ));
        }
        if prompts.is_empty() {
            return Err(BenchError::validation(
                "Prompt suite is empty; generate a suite before running",
            ));
        }

        let mut controllers = vec![RunController::new(RunId::Primary, primary.trimmed())];
        match secondary {
            Some(config) if config.is_complete() => {
                controllers.push(RunController::new(RunId::Secondary, config.trimmed()));
            }
            Some(_) => {
                tracing::warn!("Secondary run configuration is incomplete, running primary only");
            }
            None => {}
        }

        Ok(BenchmarkSession {
            prompts: prompts.snapshot(),
            controllers,
            client: Arc::clone(&self.client),
            events: self.events.clone(),
            logging_enabled: self.logging_enabled,
        })
    }

    /// Prepare and run a benchmark in one step
    pub async fn run(
        &self,
        prompts: &PromptSet,
        primary: &RunConfig,
        secondary: Option<&RunConfig>,
    ) -> BenchResult<BenchmarkReport> {
        self.prepare(prompts, primary, secondary)?.run().await
    }
}

/// A prepared benchmark: fixed prompts and runs that have not started yet
pub struct BenchmarkSession {
    prompts: PromptSnapshot,
    controllers: Vec<RunController>,
    client: Arc<dyn ScoringClient>,
    events: broadcast::Sender<BenchmarkEvent>,
    logging_enabled: bool,
}

impl BenchmarkSession {
    /// Control handles of every run, primary first
    pub fn handles(&self) -> Vec<RunHandle> {
        self.controllers.iter().map(RunController::handle).collect()
    }

    /// Control handle of one run
    pub fn handle(&self, run: RunId) -> Option<RunHandle> {
        self.controllers
            .iter()
            .find(|controller| controller.id() == run)
            .map(RunController::handle)
    }

    pub fn prompts(&self) -> &[PromptRecord] {
        &self.prompts
    }

    /// Run every controller to a terminal state
    pub async fn run(self) -> BenchResult<BenchmarkReport> {
        let started_at = Utc::now();
        let total = self.prompts.len();
        let prompts: &[PromptRecord] = &self.prompts;
        let client: &dyn ScoringClient = self.client.as_ref();

        tracing::info!(
            runs = self.controllers.len(),
            prompts = total,
            logging = self.logging_enabled,
            "Starting benchmark"
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let starts: Vec<_> = self
            .controllers
            .iter()
            .map(|controller| {
                let tx = tx.clone();
                async move { controller.start(prompts, client, &tx).await }
            })
            .collect();
        // The drain ends once every run has dropped its sender
        drop(tx);

        let runs = async {
            let started = Instant::now();
            let outcomes = join_all(starts).await;
            (outcomes, started.elapsed())
        };

        let drain = async {
            let mut aggregators: BTreeMap<RunId, StatsAggregator> = self
                .controllers
                .iter()
                .map(|controller| (controller.id(), StatsAggregator::new()))
                .collect();
            let mut log = LogSink::new(self.logging_enabled);

            while let Some(event) = rx.recv().await {
                let update = match &event {
                    RunEvent::PromptFinished {
                        run,
                        request,
                        result,
                        payload,
                    } => {
                        let aggregator = aggregators.entry(*run).or_default();
                        aggregator.record(result);
                        log.record(*run, request, result, payload);
                        Some((*run, aggregator.stats().clone()))
                    }
                    _ => None,
                };

                self.publish(BenchmarkEvent::Run(event));
                if let Some((run, stats)) = update {
                    self.publish(BenchmarkEvent::StatsUpdated {
                        run,
                        processed: stats.processed(),
                        percent: stats.progress_percent(total),
                        total,
                        stats,
                    });
                }
            }

            (aggregators, log)
        };

        let ((outcomes, elapsed), (mut aggregators, log)) = tokio::join!(runs, drain);
        let outcomes = outcomes.into_iter().collect::<BenchResult<Vec<_>>>()?;
        let total_elapsed_ms = elapsed.as_micros() as f64 / 1000.0;

        let runs = self
            .controllers
            .iter()
            .zip(outcomes)
            .map(|(controller, outcome)| RunReport {
                run: outcome.run,
                endpoint: controller.config().endpoint.clone(),
                model: controller.config().model.clone(),
                state: outcome.state,
                attempted: outcome.attempted,
                stats: aggregators
                    .remove(&outcome.run)
                    .map(StatsAggregator::into_stats)
                    .unwrap_or_default(),
            })
            .collect();

        tracing::info!(total_elapsed_ms, "Benchmark finished");
        self.publish(BenchmarkEvent::Finished { total_elapsed_ms });

        Ok(BenchmarkReport {
            id: Uuid::new_v4(),
            started_at,
            total_elapsed_ms,
            total_prompts: total,
            runs,
            log,
        })
    }

    fn publish(&self, event: BenchmarkEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}
