//! Benchmark runs
//!
//! A run scores one model against the prompt suite, one prompt at a time.
//! Its state is owned by the run and manipulated through a [`RunHandle`].

mod controller;
mod handle;
mod result;
mod state;

pub use controller::{RunController, RunEvent, RunOutcome};
pub use handle::RunHandle;
pub use result::CallResult;
pub use state::{RunId, RunState};
