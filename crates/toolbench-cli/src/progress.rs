//! Live progress display for benchmark runs

use std::collections::BTreeMap;

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use toolbench_core::orchestrator::BenchmarkEvent;
use toolbench_core::run::{RunEvent, RunId, RunState};

const PROMPT_PREVIEW_CHARS: usize = 48;

/// One progress bar per run
pub struct BenchmarkProgress {
    bars: BTreeMap<RunId, ProgressBar>,
    _multi: MultiProgress,
}

impl BenchmarkProgress {
    pub fn new(runs: &[RunId], total: usize) -> Self {
        let multi = MultiProgress::new();
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let bars = runs
            .iter()
            .map(|run| {
                let bar = multi.add(ProgressBar::new(total as u64));
                bar.set_style(style.clone());
                bar.set_prefix(run.to_string());
                (*run, bar)
            })
            .collect();

        Self {
            bars,
            _multi: multi,
        }
    }

    pub fn handle_event(&self, event: &BenchmarkEvent) {
        match event {
            BenchmarkEvent::Run(RunEvent::Started { run, model, .. }) => {
                self.with_bar(*run, |bar| bar.set_message(format!("{} starting", model)));
            }
            BenchmarkEvent::Run(RunEvent::PromptStarted { run, index, text }) => {
                self.with_bar(*run, |bar| {
                    bar.set_message(format!("#{}: \"{}\"", index + 1, preview(text)))
                });
            }
            BenchmarkEvent::Run(RunEvent::PromptFinished { run, result, .. }) => {
                let status = if result.success {
                    "Success".green()
                } else {
                    "Failed".red()
                };
                self.with_bar(*run, |bar| {
                    bar.println(format!(
                        "{} #{}: {} | {:.2} ms | {}",
                        run,
                        result.number(),
                        status,
                        result.elapsed_ms,
                        preview(&result.display_text())
                    ))
                });
            }
            BenchmarkEvent::StatsUpdated { run, stats, processed, .. } => {
                let average = stats.average_elapsed_ms().unwrap_or_default();
                self.with_bar(*run, |bar| {
                    bar.set_position(*processed as u64);
                    bar.set_message(format!(
                        "✓ {} ✗ {} avg {:.2} ms",
                        stats.success_count, stats.failure_count, average
                    ));
                });
            }
            BenchmarkEvent::Run(RunEvent::Finished { run, state, .. }) => {
                let label = match state {
                    RunState::Completed => "completed".green(),
                    RunState::Stopped => "stopped".yellow(),
                    other => other.as_str().normal(),
                };
                self.with_bar(*run, |bar| bar.abandon_with_message(label.to_string()));
            }
            BenchmarkEvent::Finished { .. } => {}
        }
    }

    /// Print a line above the bars
    pub fn println(&self, message: &str) {
        match self.bars.values().next() {
            Some(bar) => bar.println(message),
            None => println!("{}", message),
        }
    }

    fn with_bar(&self, run: RunId, f: impl FnOnce(&ProgressBar)) {
        if let Some(bar) = self.bars.get(&run) {
            f(bar);
        }
    }
}

fn preview(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= PROMPT_PREVIEW_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("{}…", cut)
    }
}
