//! Benchmark run command

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use toolbench_core::config::{BenchConfig, RunConfig};
use toolbench_core::log_sink::LogFilter;
use toolbench_core::orchestrator::{BenchmarkEvent, BenchmarkOrchestrator};
use toolbench_core::prompts::PromptSet;
use toolbench_core::report::{ReportFormat, generate_report};
use toolbench_core::run::RunHandle;

use crate::args::RunArgs;
use crate::console::CliConsole;
use crate::control::ControlCommand;
use crate::logging;
use crate::progress::BenchmarkProgress;

pub async fn execute(args: RunArgs) -> Result<()> {
    let mut config = super::load_config(&args.config_file, &args.suite)?;
    apply_overrides(&mut config, &args);
    logging::init(&config.logging);
    config.validate()?;

    let format: ReportFormat = args.format.parse()?;
    let console = CliConsole::new(!args.non_interactive);

    let prompts = match &args.suite_file {
        Some(path) => PromptSet::load_from_file(path)
            .with_context(|| format!("Failed to load suite from '{}'", path.display()))?,
        None => super::generate_suite(&config, args.suite.seed)?,
    };

    if config.secondary.is_some() && config.effective_secondary().is_none() {
        console.warn("Second model is missing an endpoint or model name; running the first model only");
    }

    let orchestrator = BenchmarkOrchestrator::from_config(&config)?;
    let events = orchestrator.subscribe();
    let session =
        orchestrator.prepare(&prompts, &config.primary, config.effective_secondary().as_ref())?;
    let handles = session.handles();
    // The display task ends when the last event sender goes away with the session
    drop(orchestrator);

    console.print_header(&format!(
        "Benchmarking {} prompt(s) against {} model(s)",
        prompts.len(),
        handles.len()
    ));
    console.info(ControlCommand::USAGE);

    let runs: Vec<_> = handles.iter().map(RunHandle::id).collect();
    let progress = Arc::new(BenchmarkProgress::new(&runs, prompts.len()));
    let shutdown = CancellationToken::new();

    let display = tokio::spawn(display_events(events, Arc::clone(&progress)));
    let interrupt = tokio::spawn(stop_on_ctrl_c(handles.clone(), shutdown.clone()));
    let controls = (!args.non_interactive).then(|| {
        tokio::spawn(read_controls(
            handles.clone(),
            Arc::clone(&progress),
            shutdown.clone(),
        ))
    });

    let result = session.run().await;
    shutdown.cancel();
    let _ = interrupt.await;
    if let Some(controls) = controls {
        let _ = controls.await;
    }
    let _ = display.await;

    let mut report = result?;
    println!("{}", generate_report(&report, format)?);

    if args.show_log {
        if args.failures_only {
            report.log.set_filter(LogFilter::FailuresOnly);
        }
        if report.log.visible().next().is_none() {
            console.warn("No call log entries to show (enable with --call-log)");
        } else {
            console.print_header("Call log");
            println!("{}", report.log.render());
        }
    }

    if let Some(path) = &args.output {
        report.save_json(path)?;
        console.success(&format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn apply_overrides(config: &mut BenchConfig, args: &RunArgs) {
    if let Some(url) = &args.scoring_url {
        config.scoring_url = url.clone();
    }
    if let Some(endpoint) = &args.primary_endpoint {
        config.primary.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.primary_model {
        config.primary.model = model.clone();
    }
    if args.secondary_endpoint.is_some() || args.secondary_model.is_some() {
        let secondary = config.secondary.get_or_insert_with(RunConfig::default);
        if let Some(endpoint) = &args.secondary_endpoint {
            secondary.endpoint = endpoint.clone();
        }
        if let Some(model) = &args.secondary_model {
            secondary.model = model.clone();
        }
    }
    if args.call_log || args.show_log {
        config.enable_logging = true;
    }
    if args.no_call_log {
        config.enable_logging = false;
    }
}

async fn display_events(
    mut events: broadcast::Receiver<BenchmarkEvent>,
    progress: Arc<BenchmarkProgress>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                progress.handle_event(&event);
                if matches!(event, BenchmarkEvent::Finished { .. }) {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Progress display lagged behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn stop_on_ctrl_c(handles: Vec<RunHandle>, shutdown: CancellationToken) {
    tokio::select! {
        _ = shutdown.cancelled() => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
                return;
            }
            eprintln!("\nStopping all runs after their current prompt... (Ctrl+C)");
            for handle in &handles {
                handle.stop();
            }
        }
    }
}

async fn read_controls(
    handles: Vec<RunHandle>,
    progress: Arc<BenchmarkProgress>,
    shutdown: CancellationToken,
) {
    let mut lines = spawn_stdin_reader();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.recv() => line,
        };

        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let message = match ControlCommand::parse(&line) {
            Ok(command) => command.apply(&handles),
            Err(error) => format!("{}. {}", error, ControlCommand::USAGE),
        };
        progress.println(&message);
    }
}

/// Read stdin on a plain thread so a pending read never holds up shutdown
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Cli, Commands};
    use clap::Parser;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["toolbench", "run"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            Commands::Generate(_) => panic!("expected run command"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = BenchConfig::default();
        config.primary = RunConfig::new("http://file:11434", "from-file");

        let args = run_args(&[
            "--primary-model",
            "llama3.1",
            "--secondary-endpoint",
            "http://localhost:11435",
            "--no-call-log",
        ]);
        apply_overrides(&mut config, &args);

        assert_eq!(config.primary, RunConfig::new("http://file:11434", "llama3.1"));
        assert_eq!(
            config.secondary,
            Some(RunConfig::new("http://localhost:11435", ""))
        );
        assert!(config.effective_secondary().is_none());
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_show_log_enables_call_log() {
        let mut config = BenchConfig {
            enable_logging: false,
            ..Default::default()
        };
        apply_overrides(&mut config, &run_args(&["--show-log"]));
        assert!(config.enable_logging);
    }
}
