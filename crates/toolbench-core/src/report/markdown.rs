//! Markdown report generation

use super::types::BenchmarkReport;
use super::{format_average, outcome_label};
use crate::error::BenchResult;
use crate::prompts::ExpectedOutcome;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(report: &BenchmarkReport) -> BenchResult<String> {
        let mut md = String::new();

        md.push_str("# Tool-Calling Benchmark Report\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Benchmark ID**: {}\n", report.id));
        md.push_str(&format!(
            "- **Started**: {}\n",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!("- **Prompts**: {}\n", report.total_prompts));
        md.push_str(&format!(
            "- **Total Time**: {:.2} ms\n\n",
            report.total_elapsed_ms
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Run | Model | State | Processed | Success | Failure | Pass Rate | Avg Time |\n");
        md.push_str("|-----|-------|-------|-----------|---------|---------|-----------|----------|\n");
        for run in &report.runs {
            md.push_str(&format!(
                "| {} | {} | {} | {}/{} | {} | {} | {} | {} |\n",
                run.run,
                run.model,
                run.state,
                run.attempted,
                report.total_prompts,
                run.stats.success_count,
                run.stats.failure_count,
                run.stats.pass_rate(),
                format_average(run.stats.average_elapsed_ms()),
            ));
        }
        md.push('\n');

        md.push_str("## Results by Expected Outcome\n\n");
        md.push_str("| Run | Outcome | Attempts | Success | Failure | Pass Rate |\n");
        md.push_str("|-----|---------|----------|---------|---------|-----------|\n");
        for run in &report.runs {
            for outcome in ExpectedOutcome::all() {
                let tally = run.stats.category(*outcome);
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    run.run,
                    outcome_label(*outcome),
                    tally.attempts(),
                    tally.success,
                    tally.failure,
                    tally.pass_rate(),
                ));
            }
        }

        let failures: Vec<_> = report
            .log
            .entries()
            .iter()
            .filter(|entry| !entry.success)
            .collect();
        if !failures.is_empty() {
            md.push_str("\n## Failed Calls\n\n");
            for entry in failures {
                let error = entry
                    .response
                    .get("error")
                    .and_then(|e| e.as_str())
                    .unwrap_or("Unknown");
                md.push_str(&format!(
                    "- Model {} #{}: \"{}\" ({})\n",
                    entry.llm, entry.sentence_index, entry.request.sentence, error
                ));
            }
        }

        Ok(md)
    }
}
