//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "toolbench.toml";

#[derive(Parser)]
#[command(name = "toolbench")]
#[command(about = "Side-by-side tool-calling benchmark for LLM endpoints")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a labelled prompt suite
    Generate(GenerateArgs),

    /// Benchmark one or two models against a prompt suite
    Run(RunArgs),
}

/// Suite generation options shared by both commands
#[derive(Args, Clone, Debug)]
pub struct SuiteArgs {
    /// Number of prompts to generate
    #[arg(long, short = 'n')]
    pub count: Option<String>,

    /// Probability that a prompt expects no tool call (clamped to 0..=1)
    #[arg(long)]
    pub no_tool_probability: Option<f64>,

    /// Seed for reproducible suites
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    #[command(flatten)]
    pub suite: SuiteArgs,

    /// Write the suite as JSON instead of printing it
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Scoring service endpoint
    #[arg(long)]
    pub scoring_url: Option<String>,

    /// Endpoint of the first model
    #[arg(long)]
    pub primary_endpoint: Option<String>,

    /// Model identifier of the first model
    #[arg(long)]
    pub primary_model: Option<String>,

    /// Endpoint of the second model
    #[arg(long)]
    pub secondary_endpoint: Option<String>,

    /// Model identifier of the second model
    #[arg(long)]
    pub secondary_model: Option<String>,

    /// Run a saved suite instead of generating one
    #[arg(long, conflicts_with_all = ["count", "no_tool_probability", "seed"])]
    pub suite_file: Option<PathBuf>,

    #[command(flatten)]
    pub suite: SuiteArgs,

    /// Report format (table, markdown, json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Export the full report as JSON
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Record every scoring call
    #[arg(long, conflicts_with = "no_call_log")]
    pub call_log: bool,

    /// Do not record scoring calls
    #[arg(long)]
    pub no_call_log: bool,

    /// Print the call log after the run
    #[arg(long)]
    pub show_log: bool,

    /// Only print failed calls from the log
    #[arg(long, requires = "show_log")]
    pub failures_only: bool,

    /// Ignore commands on stdin
    #[arg(long)]
    pub non_interactive: bool,
}
