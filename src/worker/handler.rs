//! Search worker implementation.
//!
//! The worker executes [`WorkerMessage`]s against a [`SearchBackend`] and turns
//! every outcome, including timeouts, into a [`WorkerResponse`]. It never
//! touches application state; reconciliation happens in the runtime loop.

use crate::domain::error::{DevRadarError, Result};
use crate::domain::{DeveloperRecord, SearchQuery};
use crate::worker::backend::SearchBackend;
use crate::worker::{WorkerMessage, WorkerResponse};
use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Executes search messages with a bounded wait.
#[derive(Clone)]
pub struct SearchWorker {
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
}

impl SearchWorker {
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Processes a worker message and returns a future resolving to its response.
    ///
    /// The future owns everything it needs, so it can be spawned and left to
    /// complete on its own; nothing cancels it once started. A backend that
    /// panics yields `SearchFailed` for the same sequence.
    pub fn handle_message(&self, message: WorkerMessage) -> impl Future<Output = WorkerResponse> + Send + 'static {
        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;
        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());

        async move {
            match message {
                WorkerMessage::Search { query } => {
                    let sequence = query.sequence;
                    AssertUnwindSafe(Self::handle_search(backend.as_ref(), timeout, query))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|payload| {
                            let reason = panic_message(payload.as_ref());
                            tracing::error!(sequence, reason, "search backend panicked");
                            Self::into_response(
                                sequence,
                                Err(DevRadarError::SearchFailed(format!("backend panicked: {reason}"))),
                            )
                        })
                }
            }
        }
        .instrument(span)
    }

    /// Handles the `Search` message.
    async fn handle_search(backend: &dyn SearchBackend, timeout: Duration, query: SearchQuery) -> WorkerResponse {
        let sequence = query.sequence;

        let result = match tokio::time::timeout(timeout, backend.search(&query)).await {
            Ok(result) => result,
            Err(_) => Err(DevRadarError::SearchFailed(format!(
                "no response within {}ms",
                timeout.as_millis()
            ))),
        };

        Self::into_response(sequence, result)
    }

    /// Converts a backend outcome into a response with consistent logging.
    fn into_response(sequence: u64, result: Result<Vec<DeveloperRecord>>) -> WorkerResponse {
        match result {
            Ok(records) => {
                tracing::debug!(sequence, record_count = records.len(), "search completed");
                WorkerResponse::SearchCompleted { sequence, records }
            }
            Err(e) => {
                tracing::debug!(sequence, error = %e, "search failed");
                WorkerResponse::SearchFailed {
                    sequence,
                    message: e.to_string(),
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, TechFilter};
    use futures_util::future::BoxFuture;

    struct Canned(Result<Vec<DeveloperRecord>>);

    impl SearchBackend for Canned {
        fn search(&self, _query: &SearchQuery) -> BoxFuture<'static, Result<Vec<DeveloperRecord>>> {
            let result = match &self.0 {
                Ok(records) => Ok(records.clone()),
                Err(e) => Err(DevRadarError::SearchFailed(e.to_string())),
            };
            Box::pin(async move { result })
        }
    }

    struct Hanging;

    impl SearchBackend for Hanging {
        fn search(&self, _query: &SearchQuery) -> BoxFuture<'static, Result<Vec<DeveloperRecord>>> {
            Box::pin(futures_util::future::pending())
        }
    }

    struct Panicking;

    impl SearchBackend for Panicking {
        fn search(&self, query: &SearchQuery) -> BoxFuture<'static, Result<Vec<DeveloperRecord>>> {
            let sequence = query.sequence;
            Box::pin(async move { decode_batch(sequence) })
        }
    }

    fn decode_batch(sequence: u64) -> Result<Vec<DeveloperRecord>> {
        panic!("bad record in batch {sequence}")
    }

    fn message(sequence: u64) -> WorkerMessage {
        WorkerMessage::search(SearchQuery::new(Coordinate::new(1.0, 2.0), TechFilter::empty(), sequence))
    }

    #[tokio::test]
    async fn echoes_sequence_on_success() {
        let worker = SearchWorker::new(Arc::new(Canned(Ok(vec![]))), Duration::from_secs(1));
        let response = worker.handle_message(message(9)).await;
        assert_eq!(response, WorkerResponse::SearchCompleted { sequence: 9, records: vec![] });
    }

    #[tokio::test]
    async fn backend_errors_become_failures() {
        let worker = SearchWorker::new(
            Arc::new(Canned(Err(DevRadarError::SearchFailed("503".into())))),
            Duration::from_secs(1),
        );
        let response = worker.handle_message(message(2)).await;
        assert!(matches!(response, WorkerResponse::SearchFailed { sequence: 2, .. }));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let worker = SearchWorker::new(Arc::new(Hanging), Duration::from_millis(20));
        match worker.handle_message(message(5)).await {
            WorkerResponse::SearchFailed { sequence, message } => {
                assert_eq!(sequence, 5);
                assert!(message.contains("20ms"), "{message}");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn panicking_backend_becomes_failure() {
        let worker = SearchWorker::new(Arc::new(Panicking), Duration::from_secs(1));
        match worker.handle_message(message(4)).await {
            WorkerResponse::SearchFailed { sequence, message } => {
                assert_eq!(sequence, 4);
                assert_eq!(message, "Search failed: backend panicked: bad record in batch 4");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
