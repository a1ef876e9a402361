//! Scoring collaborator
//!
//! The scoring service sends one prompt to a model endpoint and judges the
//! tool-calling decision. The engine only sees the [`ScoringClient`] trait.

mod http;
mod types;

pub use http::{DEFAULT_SCORING_URL, HttpScoringClient};
pub use types::{ScoringRequest, ScoringResponse, ToolCallObservation};

use async_trait::async_trait;

use crate::error::BenchResult;

/// Client for the remote scoring service
///
/// An `Err` is a transport-level failure (connection refused, malformed
/// body). A failure judged by the service is an `Ok` response with
/// `success == false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Score one prompt against one model
    async fn score(&self, request: ScoringRequest) -> BenchResult<ScoringResponse>;
}
