//! Toolbench CLI application
//!
//! Benchmarks the tool-calling decisions of one or two model endpoints
//! against a generated prompt suite.
//!
//! # Commands
//!
//! - `toolbench generate` writes a labelled prompt suite (stdout or JSON file)
//!   so it can be reviewed and edited before a run.
//! - `toolbench run` benchmarks the configured models against a generated or
//!   saved suite. While it runs, type `pause <n>`, `resume <n>`, `stop <n>` or
//!   `stop` on stdin; Ctrl-C stops every run.

mod args;
mod commands;
mod console;
mod control;
mod logging;
mod progress;

use std::process::ExitCode;

use clap::Parser;

use crate::args::{Cli, Commands};
use crate::console::CliConsole;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args).await,
        Commands::Run(args) => commands::run::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            CliConsole::new(true).error(&format!("{:#}", error));
            ExitCode::FAILURE
        }
    }
}
