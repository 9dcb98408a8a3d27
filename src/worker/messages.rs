//! Worker message types.
//!
//! This module defines the request/response protocol between the runtime loop
//! and the search worker. Both directions are plain serde types so a host can
//! move them across a thread or process boundary unchanged.

use crate::domain::{DeveloperRecord, SearchQuery};
use serde::{Deserialize, Serialize};

/// Messages sent from the runtime loop to the search worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Run one proximity query against the search backend.
    Search {
        /// The sequenced query; its `sequence` is echoed in the response.
        query: SearchQuery,
    },
}

impl WorkerMessage {
    /// Creates a `Search` message for the given query.
    #[must_use]
    pub const fn search(query: SearchQuery) -> Self {
        Self::Search { query }
    }

    /// Short variant name for span and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
        }
    }
}

/// Responses sent from the search worker back to the runtime loop.
///
/// Every response carries the sequence of the query it answers so the
/// coordinator can reconcile it regardless of arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The backend answered with a list of developers.
    SearchCompleted {
        /// Sequence of the answered query.
        sequence: u64,

        /// Records in backend order.
        records: Vec<DeveloperRecord>,
    },

    /// The backend call failed or timed out.
    SearchFailed {
        /// Sequence of the failed query.
        sequence: u64,

        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        match self {
            Self::SearchCompleted { sequence, .. } | Self::SearchFailed { sequence, .. } => *sequence,
        }
    }
}
