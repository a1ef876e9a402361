//! Cloneable control handle for a run

use std::sync::Arc;

use tokio::sync::watch;

use super::state::{RunId, RunState};
use crate::error::{BenchError, BenchResult};

/// How a call to [`RunHandle::begin`] resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Begin {
    Started,
    /// A stop arrived before the run could start
    StoppedBeforeStart,
}

/// Control surface of one run
///
/// The state lives in a watch channel so the iteration loop can suspend on
/// it while paused. Clones share the same state and may be used from any
/// task or thread.
#[derive(Debug, Clone)]
pub struct RunHandle {
    id: RunId,
    state: Arc<watch::Sender<RunState>>,
}

impl RunHandle {
    pub fn new(id: RunId) -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        Self {
            id,
            state: Arc::new(state),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Pause a running run; returns whether the state changed
    pub fn pause(&self) -> bool {
        let changed = self.transition(|state| (state == RunState::Running).then_some(RunState::Paused));
        if changed {
            tracing::info!(run = %self.id, "Run paused");
        }
        changed
    }

    /// Resume a paused run; returns whether the state changed
    pub fn resume(&self) -> bool {
        let changed = self.transition(|state| (state == RunState::Paused).then_some(RunState::Running));
        if changed {
            tracing::info!(run = %self.id, "Run resumed");
        }
        changed
    }

    /// Stop the run for good; returns whether the state changed
    ///
    /// An in-flight scoring call is not aborted: the run ends at its next
    /// checkpoint.
    pub fn stop(&self) -> bool {
        let changed = self.transition(|state| (!state.is_terminal()).then_some(RunState::Stopped));
        if changed {
            tracing::info!(run = %self.id, "Run stopped");
        }
        changed
    }

    /// Enter `Running` from `Idle` in a single state update
    ///
    /// A run already stopped stays stopped. Any other state is invalid.
    pub(crate) fn begin(&self) -> BenchResult<Begin> {
        let mut actual = RunState::Idle;
        self.state.send_if_modified(|state| {
            actual = *state;
            if *state == RunState::Idle {
                *state = RunState::Running;
                true
            } else {
                false
            }
        });

        match actual {
            RunState::Idle => Ok(Begin::Started),
            RunState::Stopped => Ok(Begin::StoppedBeforeStart),
            actual => Err(BenchError::InvalidState {
                expected: RunState::Idle,
                actual,
            }),
        }
    }

    /// Mark the run completed unless it was stopped; returns the final state
    pub(crate) fn complete(&self) -> RunState {
        self.transition(|state| (!state.is_terminal()).then_some(RunState::Completed));
        self.state()
    }

    /// Suspend until the run is no longer paused and report the state
    pub(crate) async fn wait_while_paused(&self) -> RunState {
        let mut receiver = self.state.subscribe();
        match receiver.wait_for(|state| *state != RunState::Paused).await {
            Ok(state) => *state,
            Err(_) => RunState::Stopped,
        }
    }

    fn transition<F>(&self, next: F) -> bool
    where
        F: FnOnce(RunState) -> Option<RunState>,
    {
        self.state.send_if_modified(|state| match next(*state) {
            Some(new_state) => {
                *state = new_state;
                true
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_commands_are_noops_outside_their_states() {
        let handle = RunHandle::new(RunId::Primary);
        assert!(!handle.pause());
        assert!(!handle.resume());
        assert_eq!(handle.state(), RunState::Idle);

        handle.begin().unwrap();
        assert!(handle.pause());
        assert!(!handle.pause());
        assert_eq!(handle.state(), RunState::Paused);

        assert!(handle.resume());
        assert!(!handle.resume());
        assert_eq!(handle.state(), RunState::Running);
    }

    #[test]
    fn test_stop_is_irreversible() {
        let handle = RunHandle::new(RunId::Secondary);
        handle.begin().unwrap();
        assert!(handle.stop());
        assert!(!handle.stop());
        assert!(!handle.resume());
        assert!(!handle.pause());
        assert_eq!(handle.complete(), RunState::Stopped);
    }

    #[test]
    fn test_begin_requires_idle() {
        let handle = RunHandle::new(RunId::Primary);
        handle.begin().unwrap();
        assert_eq!(
            handle.begin().unwrap_err(),
            BenchError::InvalidState {
                expected: RunState::Idle,
                actual: RunState::Running,
            }
        );
    }

    #[test]
    fn test_begin_after_stop_keeps_run_stopped() {
        let handle = RunHandle::new(RunId::Secondary);
        assert!(handle.stop());
        assert_eq!(handle.begin().unwrap(), Begin::StoppedBeforeStart);
        assert_eq!(handle.state(), RunState::Stopped);
        assert_eq!(handle.complete(), RunState::Stopped);
    }

    #[test]
    fn test_begin_after_completion_is_invalid() {
        let handle = RunHandle::new(RunId::Primary);
        handle.begin().unwrap();
        handle.complete();
        assert_eq!(
            handle.begin().unwrap_err(),
            BenchError::InvalidState {
                expected: RunState::Idle,
                actual: RunState::Completed,
            }
        );
    }

    #[test]
    fn test_clones_share_state() {
        let handle = RunHandle::new(RunId::Primary);
        let other = handle.clone();
        handle.begin().unwrap();
        other.pause();
        assert_eq!(handle.state(), RunState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_while_paused_wakes_on_resume() {
        let handle = RunHandle::new(RunId::Primary);
        handle.begin().unwrap();
        handle.pause();

        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.wait_while_paused().await });

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!task.is_finished());

        handle.resume();
        assert_eq!(task.await.unwrap(), RunState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_while_paused_wakes_on_stop() {
        let handle = RunHandle::new(RunId::Primary);
        handle.begin().unwrap();
        handle.pause();

        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.wait_while_paused().await });
        tokio::task::yield_now().await;

        handle.stop();
        assert_eq!(task.await.unwrap(), RunState::Stopped);
    }
}
