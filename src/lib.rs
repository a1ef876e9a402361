//! Toolbench
//!
//! Side-by-side tool-calling benchmark harness for LLM endpoints. This crate
//! re-exports the engine from `toolbench-core`; the `toolbench` binary lives
//! in `toolbench-cli`.

pub use toolbench_core::*;
