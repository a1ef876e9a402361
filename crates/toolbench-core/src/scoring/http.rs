//! HTTP scoring client

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use super::ScoringClient;
use super::types::{ScoringRequest, ScoringResponse};
use crate::error::{BenchError, BenchResult};

/// Scoring endpoint of a locally running scoring service
pub const DEFAULT_SCORING_URL: &str = "http://localhost:8090/benchmark";

/// Scoring client that POSTs JSON requests to the scoring service
///
/// No request timeout is configured: a hung call stalls its run until it
/// resolves or a transport error occurs.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    scoring_url: String,
    http_client: Client,
}

impl HttpScoringClient {
    /// Create a client for the given scoring endpoint
    pub fn new(scoring_url: impl Into<String>) -> BenchResult<Self> {
        Self::with_client(scoring_url, Client::new())
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(scoring_url: impl Into<String>, http_client: Client) -> BenchResult<Self> {
        let scoring_url = scoring_url.into().trim().to_string();
        if scoring_url.is_empty() {
            return Err(BenchError::config("Scoring service URL must not be empty"));
        }

        Ok(Self {
            scoring_url,
            http_client,
        })
    }

    /// Scoring endpoint this client talks to
    pub fn scoring_url(&self) -> &str {
        &self.scoring_url
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    #[instrument(skip(self, request), fields(model = %request.model_name), level = "debug")]
    async fn score(&self, request: ScoringRequest) -> BenchResult<ScoringResponse> {
        let response = self
            .http_client
            .post(&self.scoring_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BenchError::http(format!("Scoring request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BenchError::http(format!("Failed to read scoring response: {}", e)))?;

        tracing::debug!(status = %status, body = %body, "Scoring service response");

        // Error statuses still carry the JSON verdict body
        let mut parsed: ScoringResponse = serde_json::from_str(&body).map_err(|e| {
            BenchError::http(format!(
                "Malformed scoring response (status {}): {}",
                status, e
            ))
        })?;

        if !status.is_success() {
            parsed.success = false;
            if parsed.error.is_none() {
                parsed.error = Some(format!("Scoring service returned status {}", status));
            }
        }

        Ok(parsed)
    }
}
