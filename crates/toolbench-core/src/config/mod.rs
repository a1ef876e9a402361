//! Configuration management for toolbench

mod loader;
mod logging;
mod model;

pub use loader::{apply_env, apply_env_with, load_from_file};
pub use logging::{LogFormat, LoggingConfig};
pub use model::{BenchConfig, DEFAULT_SUITE_SIZE, RunConfig, SuiteConfig};
