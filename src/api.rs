// Analysis service client: HTTP calls to the phishing analysis API.
//
// The detection engine is a remote collaborator; this client owns the
// wire format inward. Errors split into the user-facing taxonomy: an
// empty submission never leaves the process, a transport failure gets
// one fixed message, and a handled service failure shows the service's
// own message verbatim.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::verdict::AnalysisResult;

/// Default base URL for the analysis API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// What can go wrong between the user's input and a decoded verdict.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Caught at the UI boundary; no request is ever issued.
    #[error("Please enter a URL to analyze.")]
    EmptyUrl,
    /// Transport-level failure. One fixed message, never the server's text.
    #[error("Could not reach the analysis service. Check that the backend is running.")]
    Network(#[source] reqwest::Error),
    /// The service answered with its own failure message; shown verbatim.
    #[error("{0}")]
    Service(String),
}

/// UI-boundary guard: trim the input; an empty submission fails here,
/// before any request exists.
pub fn prepare_url(raw: &str) -> Result<&str, AnalysisError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(AnalysisError::EmptyUrl);
    }
    Ok(url)
}

/// Per-URL outcome of a batch submission. The service mixes full verdicts
/// with `{url, error}` records for URLs it could not analyze.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Verdict(AnalysisResult),
    Failed { url: String, error: String },
}

/// Client-side port for the analysis service. The batch default loops the
/// single-URL call so fakes only need `analyze`; the HTTP client
/// overrides it with the real batch endpoint.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Submit one URL for analysis.
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Submit several URLs, returning one outcome per URL in order.
    /// Transport failures abort the whole batch; per-URL service failures
    /// become `Failed` records.
    async fn analyze_batch(&self, urls: &[String]) -> Result<Vec<BatchOutcome>, AnalysisError> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            match self.analyze(url).await {
                Ok(result) => outcomes.push(BatchOutcome::Verdict(result)),
                Err(AnalysisError::Network(e)) => return Err(AnalysisError::Network(e)),
                Err(e) => outcomes.push(BatchOutcome::Failed {
                    url: url.clone(),
                    error: e.to_string(),
                }),
            }
        }
        Ok(outcomes)
    }

    /// Best-effort reachability check; failures are logged, never raised.
    async fn health_check(&self) -> bool;
}

/// reqwest-backed implementation of [`AnalysisApi`].
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Build a client against the given API base URL (a trailing slash is
    /// stripped).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("lurecheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read the service's failure body, falling back to a fixed line when
    /// the body is missing or unreadable.
    async fn failure_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiFailure>().await {
            Ok(failure) if !failure.message.trim().is_empty() => failure.message,
            _ => format!("URL analysis failed (HTTP {status})"),
        }
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        // The URL goes through verbatim apart from the trim; the service
        // owns URL validation.
        let url = url.trim();
        let endpoint = format!("{}/analyze", self.base_url);
        debug!(url, "analysis request");

        let response = self
            .client
            .post(&endpoint)
            .json(&AnalyzeRequest { url })
            .send()
            .await
            .map_err(AnalysisError::Network)?;

        if !response.status().is_success() {
            return Err(AnalysisError::Service(Self::failure_message(response).await));
        }

        response.json::<AnalysisResult>().await.map_err(|e| {
            AnalysisError::Service(format!("Unreadable response from the analysis service: {e}"))
        })
    }

    async fn analyze_batch(&self, urls: &[String]) -> Result<Vec<BatchOutcome>, AnalysisError> {
        let endpoint = format!("{}/batch-analyze", self.base_url);
        debug!(count = urls.len(), "batch analysis request");

        let response = self
            .client
            .post(&endpoint)
            .json(&BatchRequest { urls })
            .send()
            .await
            .map_err(AnalysisError::Network)?;

        if !response.status().is_success() {
            return Err(AnalysisError::Service(Self::failure_message(response).await));
        }

        let body: BatchResponse = response.json().await.map_err(|e| {
            AnalysisError::Service(format!("Unreadable response from the analysis service: {e}"))
        })?;
        Ok(body.results)
    }

    async fn health_check(&self) -> bool {
        let endpoint = format!("{}/health", self.base_url);
        match self.client.get(&endpoint).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "analysis service health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "analysis service unreachable");
                false
            }
        }
    }
}

// --- Analysis API request/response types ---

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    urls: &'a [String],
}

#[derive(Deserialize)]
struct BatchResponse {
    results: Vec<BatchOutcome>,
}

#[derive(Deserialize)]
struct ApiFailure {
    message: String,
}
