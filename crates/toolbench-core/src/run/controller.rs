//! Sequential evaluation loop of one run

use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::handle::{Begin, RunHandle};
use super::result::CallResult;
use super::state::{RunId, RunState};
use crate::config::RunConfig;
use crate::error::{BenchError, BenchResult};
use crate::prompts::PromptRecord;
use crate::scoring::{ScoringClient, ScoringRequest};

/// Events emitted by a run while it iterates its prompts
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// The run entered `Running`
    Started {
        run: RunId,
        model: String,
        total: usize,
    },
    /// A prompt is about to be scored
    PromptStarted {
        run: RunId,
        index: usize,
        text: String,
    },
    /// A prompt was scored; emitted exactly once per attempted prompt
    PromptFinished {
        run: RunId,
        request: ScoringRequest,
        result: CallResult,
        /// Full response body, or a synthesized failure body
        payload: Value,
    },
    /// The run reached a terminal state
    Finished {
        run: RunId,
        state: RunState,
        attempted: usize,
    },
}

impl RunEvent {
    pub fn run(&self) -> RunId {
        match self {
            RunEvent::Started { run, .. }
            | RunEvent::PromptStarted { run, .. }
            | RunEvent::PromptFinished { run, .. }
            | RunEvent::Finished { run, .. } => *run,
        }
    }
}

/// Final state of a run and how many prompts it attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub run: RunId,
    pub state: RunState,
    pub attempted: usize,
}

/// Drives one model through a prompt suite
pub struct RunController {
    handle: RunHandle,
    config: RunConfig,
}

impl RunController {
    pub fn new(id: RunId, config: RunConfig) -> Self {
        Self {
            handle: RunHandle::new(id),
            config,
        }
    }

    pub fn id(&self) -> RunId {
        self.handle.id()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Control handle sharing this run's state
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    /// Score every prompt in order until exhausted or stopped
    ///
    /// A run stopped before it starts finishes immediately without
    /// attempting anything. Per-call failures become failed results and
    /// never end the loop.
    pub async fn start(
        &self,
        prompts: &[PromptRecord],
        client: &dyn ScoringClient,
        events: &mpsc::UnboundedSender<RunEvent>,
    ) -> BenchResult<RunOutcome> {
        let run = self.id();

        if prompts.is_empty() {
            return Err(BenchError::validation("Cannot start a run without prompts"));
        }

        if self.handle.begin()? == Begin::StoppedBeforeStart {
            tracing::info!(run = %run, "Run stopped before start");
            return Ok(self.finish(events, 0));
        }

        tracing::info!(run = %run, model = %self.config.model, total = prompts.len(), "Run started");
        Self::emit(
            events,
            RunEvent::Started {
                run,
                model: self.config.model.clone(),
                total: prompts.len(),
            },
        );

        let mut attempted = 0;
        for (index, prompt) in prompts.iter().enumerate() {
            if !self.checkpoint().await {
                tracing::debug!(run = %run, index, "Stopped before prompt");
                break;
            }

            Self::emit(
                events,
                RunEvent::PromptStarted {
                    run,
                    index,
                    text: prompt.text.clone(),
                },
            );

            let request = ScoringRequest::new(&self.config, prompt);
            let started = Instant::now();
            let response = client.score(request.clone()).await;
            let elapsed_ms = started.elapsed().as_micros() as f64 / 1000.0;

            let (result, payload) = match response {
                Ok(response) => (
                    CallResult::from_response(index, prompt, &response, elapsed_ms),
                    response.to_payload(),
                ),
                Err(error) => {
                    tracing::warn!(run = %run, index, error = %error, "Scoring call failed");
                    let payload = json!({
                        "success": false,
                        "sentence": prompt.text,
                        "error": error.to_string(),
                    });
                    (
                        CallResult::transport_failure(index, prompt, &error, elapsed_ms),
                        payload,
                    )
                }
            };

            tracing::debug!(
                run = %run,
                index,
                success = result.success,
                elapsed_ms,
                "Prompt scored"
            );
            attempted += 1;
            Self::emit(
                events,
                RunEvent::PromptFinished {
                    run,
                    request,
                    result,
                    payload,
                },
            );

            if !self.checkpoint().await {
                tracing::debug!(run = %run, index, "Stopped after prompt");
                break;
            }
        }

        Ok(self.finish(events, attempted))
    }

    /// Stop check, suspension while paused, then a second stop check
    async fn checkpoint(&self) -> bool {
        if self.handle.state() == RunState::Stopped {
            return false;
        }
        self.handle.wait_while_paused().await != RunState::Stopped
    }

    fn finish(&self, events: &mpsc::UnboundedSender<RunEvent>, attempted: usize) -> RunOutcome {
        let run = self.id();
        let state = self.handle.complete();
        tracing::info!(run = %run, state = %state, attempted, "Run finished");
        Self::emit(
            events,
            RunEvent::Finished {
                run,
                state,
                attempted,
            },
        );
        RunOutcome {
            run,
            state,
            attempted,
        }
    }

    fn emit(events: &mpsc::UnboundedSender<RunEvent>, event: RunEvent) {
        // A dropped receiver only means nobody is watching
        let _ = events.send(event);
    }
}
