//! Report generation for benchmark results
//!
//! Generates reports in various formats (table, Markdown, JSON).

mod json;
mod markdown;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use types::{BenchmarkReport, RunReport};

use crate::error::{BenchError, BenchResult};
use crate::prompts::ExpectedOutcome;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Markdown,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(BenchError::validation(format!(
                "Unknown report format '{}'",
                other
            ))),
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &BenchmarkReport, format: ReportFormat) -> BenchResult<String> {
    match format {
        ReportFormat::Table => Ok(generate_table(report)),
        ReportFormat::Markdown => MarkdownReporter::generate(report),
        ReportFormat::Json => JsonReporter::generate(report),
    }
}

pub(crate) fn format_average(average_ms: Option<f64>) -> String {
    match average_ms {
        Some(ms) => format!("{:.2} ms", ms),
        None => "0 ms".to_string(),
    }
}

pub(crate) fn outcome_label(outcome: ExpectedOutcome) -> &'static str {
    match outcome {
        ExpectedOutcome::Tool => "TOOL",
        ExpectedOutcome::NoTool => "NONE",
    }
}

/// Plain table for terminal output
fn generate_table(report: &BenchmarkReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<70}\n", "= Tool-Calling Benchmark Results "));
    output.push_str(&format!(
        "Started: {} | Prompts: {} | Total Time: {:.2} ms\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.total_prompts,
        report.total_elapsed_ms
    ));
    output.push_str(&format!("{:=<70}\n\n", ""));

    for run in &report.runs {
        output.push_str(&format!("{} ({} @ {})\n", run.run, run.model, run.endpoint));
        output.push_str(&format!("{:-<70}\n", ""));
        output.push_str(&format!(
            "State: {} | Processed: {}/{} ({}%)\n",
            run.state,
            run.attempted,
            report.total_prompts,
            run.stats.progress_percent(report.total_prompts)
        ));
        output.push_str(&format!(
            "Success: {} | Failure: {} | Pass Rate: {} | Avg Time: {}\n",
            run.stats.success_count,
            run.stats.failure_count,
            run.stats.pass_rate(),
            format_average(run.stats.average_elapsed_ms())
        ));

        output.push_str(&format!(
            "{:<10} {:>10} {:>10} {:>10} {:>12}\n",
            "Outcome", "Attempts", "Success", "Failure", "Pass Rate"
        ));
        for outcome in ExpectedOutcome::all() {
            let tally = run.stats.category(*outcome);
            output.push_str(&format!(
                "{:<10} {:>10} {:>10} {:>10} {:>12}\n",
                outcome_label(*outcome),
                tally.attempts(),
                tally.success,
                tally.failure,
                tally.pass_rate().to_string()
            ));
        }
        output.push('\n');
    }

    output
}
