//! Suite and report files through the public API

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use toolbench::config::load_from_file;
use toolbench::{
    BenchResult, BenchmarkOrchestrator, ExpectedOutcome, PromptSet, RunConfig, ScoringClient,
    ScoringRequest, ScoringResponse,
};

/// Passes TOOL prompts and fails NONE prompts
struct ToolOnlyClient;

#[async_trait]
impl ScoringClient for ToolOnlyClient {
    async fn score(&self, request: ScoringRequest) -> BenchResult<ScoringResponse> {
        Ok(match request.expected_tool {
            ExpectedOutcome::Tool => ScoringResponse::success(""),
            ExpectedOutcome::NoTool => ScoringResponse::failure("Expected no tool call"),
        })
    }
}

#[test]
fn test_saved_suite_uses_wire_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("suite.json");

    let mut prompts = PromptSet::new();
    prompts.push("What is 2+2?", ExpectedOutcome::NoTool);
    prompts.push("Is it going to rain tomorrow in Denver, CO?", ExpectedOutcome::Tool);
    prompts.save_to_file(&path).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved[0]["sentence"], "What is 2+2?");
    assert_eq!(saved[0]["expected_tool"], "none");
    assert_eq!(saved[1]["expected_tool"], "get_current_weather");
}

#[tokio::test]
async fn test_edited_suite_file_drives_a_run() {
    let temp_dir = TempDir::new().unwrap();
    let suite_path = temp_dir.path().join("suite.json");
    let config_path = temp_dir.path().join("toolbench.yaml");
    let report_path = temp_dir.path().join("report.json");

    std::fs::write(
        &suite_path,
        r#"[
            {"sentence": "Tell me a joke.", "expected_tool": "none"},
            {"sentence": "How's the weather in Miami, FL today?", "expected_tool": "get_current_weather"},
            {"sentence": "What's the temperature like right now in Boston, MA?", "expected_tool": "get_current_weather"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        &config_path,
        "primary:\n  endpoint: http://localhost:11434\n  model: llama3.1\nenable_logging: true\n",
    )
    .unwrap();

    let config = load_from_file(&config_path).unwrap();
    config.validate().unwrap();

    let prompts = PromptSet::load_from_file(&suite_path).unwrap();
    let orchestrator = BenchmarkOrchestrator::new(Arc::new(ToolOnlyClient))
        .with_logging(config.enable_logging);
    let report = orchestrator
        .run(&prompts, &config.primary, config.effective_secondary().as_ref())
        .await
        .unwrap();

    let stats = &report.runs[0].stats;
    assert_eq!(stats.success_count, 2);
    assert_eq!(stats.failure_count, 1);
    assert_eq!(
        stats.category_pass_rate(ExpectedOutcome::NoTool).to_string(),
        "0.00%"
    );
    assert_eq!(
        stats.category_pass_rate(ExpectedOutcome::Tool).to_string(),
        "100.00%"
    );

    report.save_json(&report_path).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(exported["total_prompts"], 3);
    assert_eq!(exported["log"]["entries"][0]["sentence_index"], 1);
    assert_eq!(
        exported["log"]["entries"][0]["response"]["error"],
        "Expected no tool call"
    );
}

#[tokio::test]
async fn test_deserialized_suite_logs_sentence_positions() {
    let prompts: PromptSet = serde_json::from_str(
        r#"[
            {"sentence": "Tell me a joke.", "expected_tool": "none"},
            {"sentence": "How's the weather in Miami, FL today?", "expected_tool": "get_current_weather"},
            {"sentence": "Describe a beautiful sunset.", "expected_tool": "none"}
        ]"#,
    )
    .unwrap();

    let orchestrator = BenchmarkOrchestrator::new(Arc::new(ToolOnlyClient)).with_logging(true);
    let report = orchestrator
        .run(
            &prompts,
            &RunConfig::new("http://localhost:11434", "llama3.1"),
            None,
        )
        .await
        .unwrap();

    let indices: Vec<usize> = report
        .log
        .entries()
        .iter()
        .map(|entry| entry.sentence_index)
        .collect();
    assert_eq!(indices, vec![1, 2, 3]);
}
