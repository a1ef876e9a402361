//! Per-call request/response log

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::run::{CallResult, RunId};
use crate::scoring::ScoringRequest;

/// One logged scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Run number (1 or 2)
    pub llm: usize,
    /// 1-based prompt number
    pub sentence_index: usize,
    pub request: ScoringRequest,
    /// Response body, or the synthesized failure body
    pub response: Value,
    pub success: bool,
    /// Engine-measured call duration
    pub time_ms: f64,
}

impl LogEntry {
    pub fn new(run: RunId, request: &ScoringRequest, result: &CallResult, response: &Value) -> Self {
        Self {
            llm: run.number(),
            sentence_index: result.number(),
            request: request.clone(),
            response: response.clone(),
            success: result.success,
            time_ms: result.elapsed_ms,
        }
    }

    pub fn run(&self) -> Option<RunId> {
        RunId::from_number(self.llm)
    }

    /// Pretty-printed JSON of the entry
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Which entries are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    FailuresOnly,
}

impl LogFilter {
    fn accepts(&self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::FailuresOnly => !entry.success,
        }
    }
}

/// Optional log of every call made during a benchmark
///
/// The filter only affects what [`LogSink::visible`] returns; recorded
/// entries are never dropped by it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogSink {
    #[serde(skip)]
    enabled: bool,
    entries: Vec<LogEntry>,
    #[serde(skip)]
    filter: LogFilter,
}

impl LogSink {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    /// Record a call; ignored when logging is disabled
    pub fn record(&mut self, run: RunId, request: &ScoringRequest, result: &CallResult, response: &Value) {
        if self.enabled {
            self.entries.push(LogEntry::new(run, request, result, response));
        }
    }

    pub fn set_filter(&mut self, filter: LogFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> LogFilter {
        self.filter
    }

    /// Entries passing the current filter, in recording order
    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(move |entry| self.filter.accepts(entry))
    }

    /// Every recorded entry
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Visible entries as pretty JSON blocks separated by blank lines
    pub fn render(&self) -> String {
        self.visible()
            .map(LogEntry::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::prompts::{ExpectedOutcome, PromptRecord};
    use crate::scoring::ScoringResponse;

    fn record(sink: &mut LogSink, id: usize, success: bool) {
        let prompt = PromptRecord::new(id, format!("prompt {}", id), ExpectedOutcome::Tool);
        let request = ScoringRequest::new(&RunConfig::new("http://localhost:11434", "m"), &prompt);
        let response = if success {
            ScoringResponse::success("ok")
        } else {
            ScoringResponse::failure("no tool call")
        };
        let result = CallResult::from_response(id, &prompt, &response, 42.0);
        sink.record(RunId::Secondary, &request, &result, &response.to_payload());
    }

    #[test]
    fn test_disabled_sink_records_nothing() {
        let mut sink = LogSink::new(false);
        record(&mut sink, 0, true);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_failure_filter_is_reversible() {
        let mut sink = LogSink::new(true);
        record(&mut sink, 0, true);
        record(&mut sink, 1, false);
        record(&mut sink, 2, true);

        sink.set_filter(LogFilter::FailuresOnly);
        let visible: Vec<usize> = sink.visible().map(|e| e.sentence_index).collect();
        assert_eq!(visible, vec![2]);

        sink.set_filter(LogFilter::All);
        assert_eq!(sink.visible().count(), 3);
    }

    #[test]
    fn test_render_entry() {
        let mut sink = LogSink::new(true);
        record(&mut sink, 0, false);

        let entry = &sink.entries()[0];
        assert_eq!(entry.run(), Some(RunId::Secondary));

        let rendered: Value = serde_json::from_str(&sink.render()).unwrap();
        assert_eq!(rendered["llm"], 2);
        assert_eq!(rendered["sentence_index"], 1);
        assert_eq!(rendered["request"]["model_name"], "m");
        assert_eq!(rendered["response"]["error"], "no tool call");
        assert_eq!(rendered["time_ms"], 42.0);

        sink.clear();
        assert!(sink.render().is_empty());
    }
}
