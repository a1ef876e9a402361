//! JSON report generation

use super::types::BenchmarkReport;
use crate::error::BenchResult;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a pretty-printed JSON report
    pub fn generate(report: &BenchmarkReport) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
