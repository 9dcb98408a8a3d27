//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing an event. Actions bridge pure
//! state transitions and effectful operations like prompting for permission,
//! fetching a position or dispatching a search.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order; asynchronous ones are spawned and report
//! back as new events.
//!
//! # Example
//!
//! ```rust
//! use devradar::app::Action;
//!
//! let actions = vec![Action::RequestPosition { high_accuracy: true }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Prompts for the location permission.
    ///
    /// Answered with `Event::PermissionResult`.
    RequestPermission,

    /// Fetches a one-shot position fix.
    ///
    /// Answered with `Event::PositionResolved` or `Event::PositionFailed`.
    RequestPosition {
        /// Whether to ask the platform for its most precise fix.
        high_accuracy: bool,
    },

    /// Posts a message to the search worker.
    ///
    /// Answered with `Event::WorkerResponse`.
    PostToWorker(WorkerMessage),

    /// Hands a failed search to the observability collaborator.
    ///
    /// Emitted at most once per search sequence.
    ReportError {
        /// Sequence of the failed search.
        sequence: u64,
        /// Error description.
        message: String,
    },

    /// Opens a developer's profile.
    Navigate {
        /// Login of the developer whose callout was activated.
        developer_username: String,
    },
}
