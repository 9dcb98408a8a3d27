//! Remote search backend abstraction.
//!
//! [`SearchBackend`] is the seam between the worker and whatever answers
//! proximity queries. The production implementation, [`HttpSearchBackend`],
//! posts to the DevRadar API; tests plug in scripted backends.

use crate::domain::error::{DevRadarError, Result};
use crate::domain::{DeveloperRecord, SearchQuery, SearchResponseBody};
use futures_util::future::BoxFuture;

/// Answers proximity queries.
///
/// Implementations return a `'static` future so the worker can spawn it.
/// Calls may complete in any order relative to each other.
pub trait SearchBackend: Send + Sync {
    /// Runs the query and returns the matching developers.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or answers with
    /// something other than a result list.
    fn search(&self, query: &SearchQuery) -> BoxFuture<'static, Result<Vec<DeveloperRecord>>>;
}

/// HTTP client for `POST {base_url}/users`.
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchBackend {
    /// Creates a backend for the API rooted at `base_url`.
    ///
    /// Timeouts are not configured on the client; the worker bounds every
    /// call itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DevRadarError::Config("api_base_url must not be empty".to_string()));
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint: format!("{base_url}/users"),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpSearchBackend {
    fn search(&self, query: &SearchQuery) -> BoxFuture<'static, Result<Vec<DeveloperRecord>>> {
        let request = self.client.post(&self.endpoint).json(&query.request_body());
        let sequence = query.sequence;

        Box::pin(async move {
            let response = request.send().await?;
            let status = response.status();

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                tracing::debug!(sequence, status = %status, "search API rejected request");
                return Err(DevRadarError::SearchFailed(format!("status {status}: {text}")));
            }

            let bytes = response.bytes().await?;
            let body: SearchResponseBody = serde_json::from_slice(&bytes)?;
            tracing::debug!(sequence, record_count = body.data.len(), "search API answered");
            Ok(body.into_records())
        })
    }
}
