//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes host input,
//! collaborator outcomes and worker responses, translating them into state
//! changes and action sequences. It is the only place where [`AppState`]
//! changes.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host or from completed collaborator tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and its components
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Startup**: `Launch`, `PermissionResult`, `PositionResolved`, `PositionFailed`
//! - **Selection**: `SelectTechs`, `ToggleTech`, `CatalogQuery`
//! - **Map**: `CalloutActivated`
//! - **Worker**: `WorkerResponse` with sequenced search outcomes
//!
//! # Example
//!
//! ```rust
//! use devradar::app::{handle_event, Action, AppState, Event};
//! use devradar::device::PermissionStatus;
//!
//! let mut state = AppState::default();
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::PermissionResult { status: PermissionStatus::Granted },
//! )?;
//! assert_eq!(actions, vec![Action::RequestPosition { high_accuracy: true }]);
//! # Ok::<(), devradar::DevRadarError>(())
//! ```

use crate::app::{Action, AppState, Reconciliation};
use crate::device::PermissionStatus;
use crate::domain::error::Result;
use crate::domain::{Coordinate, DevRadarError};
use crate::worker::WorkerResponse;

/// Events triggered by the host, device collaborators or the search worker.
///
/// The runtime feeds these through [`handle_event`] one at a time, so state
/// transitions are deterministic even though collaborators run concurrently.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The map screen was mounted.
    Launch,

    /// The permission prompt was answered.
    PermissionResult {
        /// User's answer.
        status: PermissionStatus,
    },

    /// The position provider produced a fix.
    PositionResolved(Coordinate),

    /// The position provider failed or timed out.
    PositionFailed {
        /// Error description.
        error: String,
    },

    /// The multi-select reported a new selection.
    ///
    /// Tags are forwarded verbatim; duplicates collapse.
    SelectTechs(Vec<String>),

    /// A single technology was tapped in the multi-select.
    ToggleTech(String),

    /// The picker's search input changed.
    CatalogQuery(String),

    /// A marker callout was tapped.
    CalloutActivated {
        /// Id of the developer behind the callout.
        developer_id: String,
    },

    /// Wraps a response from the search worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// `(should_render, actions)`: whether the view model changed, and the side
/// effects to run in order. Stale worker responses yield `(false, [])`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime contract uniform with
/// action execution.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Launch => {
            tracing::info!("map screen launched, requesting location permission");
            Ok((true, vec![Action::RequestPermission]))
        }
        Event::PermissionResult { status } => {
            state.permission = *status;

            if status.is_granted() {
                tracing::debug!(high_accuracy = state.high_accuracy, "permission granted");
                return Ok((
                    false,
                    vec![Action::RequestPosition {
                        high_accuracy: state.high_accuracy,
                    }],
                ));
            }

            tracing::warn!(status = ?status, error = %DevRadarError::PermissionDenied, "search disabled");
            Ok((true, vec![]))
        }
        Event::PositionResolved(coordinate) => {
            if !state.permission.is_granted() {
                tracing::warn!(
                    status = ?state.permission,
                    error = %DevRadarError::PermissionDenied,
                    "position fix without granted permission ignored"
                );
                return Ok((false, vec![]));
            }

            if !coordinate.is_valid() {
                tracing::warn!(
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "position provider returned an invalid coordinate"
                );
                return position_failed(state, "invalid coordinate");
            }

            tracing::info!(
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "position resolved"
            );

            state.coordinate = Some(*coordinate);
            state.position_error = None;

            let filter = state.selection.snapshot();
            let actions = state.trigger_search(filter).into_iter().collect();
            Ok((true, actions))
        }
        Event::PositionFailed { error } => position_failed(state, error),
        Event::SelectTechs(tags) => {
            let filter = state.selection.set_selected(tags.iter().cloned());
            tracing::debug!(selected = ?filter, "selection changed");

            let actions = state.trigger_search(filter).into_iter().collect();
            Ok((true, actions))
        }
        Event::ToggleTech(tag) => {
            let filter = state.selection.toggle(tag);
            tracing::debug!(tag = %tag, selected = ?filter, "selection toggled");

            let actions = state.trigger_search(filter).into_iter().collect();
            Ok((true, actions))
        }
        Event::CatalogQuery(query) => {
            if state.catalog_query == *query {
                return Ok((false, vec![]));
            }
            state.catalog_query.clone_from(query);
            tracing::trace!(query = %query, "catalog query updated");
            Ok((true, vec![]))
        }
        Event::CalloutActivated { developer_id } => {
            let Some(record) = state.coordinator.find(developer_id) else {
                tracing::debug!(developer_id = %developer_id, "callout for unknown developer ignored");
                return Ok((false, vec![]));
            };

            tracing::debug!(developer_id = %developer_id, username = %record.username, "opening profile");
            Ok((
                false,
                vec![Action::Navigate {
                    developer_username: record.username.clone(),
                }],
            ))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn position_failed(state: &mut AppState, error: &str) -> Result<(bool, Vec<Action>)> {
    tracing::error!(error = %error, "position unavailable, search not started");
    state.position_error = Some(error.to_string());
    Ok((true, vec![]))
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::SearchCompleted { sequence, records } => {
            match state.coordinator.accept(*sequence, records.clone()) {
                Reconciliation::Applied => {
                    tracing::info!(sequence, record_count = records.len(), "search results applied");
                    Ok((true, vec![]))
                }
                Reconciliation::Discarded => Ok((false, vec![])),
            }
        }
        WorkerResponse::SearchFailed { sequence, message } => match state.coordinator.fail(*sequence, message) {
            Reconciliation::Applied => Ok((
                true,
                vec![Action::ReportError {
                    sequence: *sequence,
                    message: message.clone(),
                }],
            )),
            Reconciliation::Discarded => Ok((false, vec![])),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CoordinatorState;
    use crate::domain::DeveloperRecord;
    use crate::worker::WorkerMessage;

    fn record(id: &str, username: &str) -> DeveloperRecord {
        DeveloperRecord {
            id: id.to_string(),
            coordinate: Coordinate::new(10.0, 20.0),
            username: username.to_string(),
            bio: None,
            avatar_url: String::new(),
            techs: vec!["Python".to_string()],
        }
    }

    fn dispatched_sequence(actions: &[Action]) -> u64 {
        match actions {
            [Action::PostToWorker(WorkerMessage::Search { query })] => query.sequence,
            other => panic!("expected a single search dispatch, got {other:?}"),
        }
    }

    fn located_state() -> AppState {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::PermissionResult { status: PermissionStatus::Granted }).unwrap();
        state
    }

    #[test]
    fn launch_requests_permission() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::Launch).unwrap();
        assert_eq!(actions, vec![Action::RequestPermission]);
    }

    #[test]
    fn resolved_position_triggers_unfiltered_search() {
        let mut state = located_state();
        let (render, actions) =
            handle_event(&mut state, &Event::PositionResolved(Coordinate::new(10.0, 20.0))).unwrap();

        assert!(render);
        let Action::PostToWorker(WorkerMessage::Search { query }) = &actions[0] else {
            panic!("expected search dispatch");
        };
        assert_eq!(query.sequence, 1);
        assert!(query.filter.is_empty());
        assert_eq!(query.coordinate, Coordinate::new(10.0, 20.0));
        assert!(state.is_loading());
    }

    #[test]
    fn accepted_response_populates_results() {
        let mut state = located_state();
        let (_, actions) =
            handle_event(&mut state, &Event::PositionResolved(Coordinate::new(10.0, 20.0))).unwrap();
        let sequence = dispatched_sequence(&actions);

        let response = WorkerResponse::SearchCompleted {
            sequence,
            records: vec![record("u1", "dev1")],
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.results(), [record("u1", "dev1")]);
        assert!(!state.is_loading());
    }

    #[test]
    fn late_response_is_discarded() {
        let mut state = located_state();
        handle_event(&mut state, &Event::PositionResolved(Coordinate::new(10.0, 20.0))).unwrap();

        let (_, a) = handle_event(&mut state, &Event::SelectTechs(vec!["PHP".into()])).unwrap();
        let (_, b) = handle_event(&mut state, &Event::ToggleTech("Python".into())).unwrap();
        let (second, third) = (dispatched_sequence(&a), dispatched_sequence(&b));
        assert_eq!((second, third), (2, 3));

        let fresh = WorkerResponse::SearchCompleted { sequence: third, records: vec![record("c", "three")] };
        let stale = WorkerResponse::SearchCompleted { sequence: second, records: vec![record("b", "two")] };

        handle_event(&mut state, &Event::WorkerResponse(fresh)).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(stale)).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.results(), [record("c", "three")]);
        assert_eq!(state.coordinator.state(), CoordinatorState::Settled(3));
    }

    #[test]
    fn denied_permission_dispatches_nothing() {
        let mut state = AppState::default();
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionResult { status: PermissionStatus::Denied }).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.permission, PermissionStatus::Denied);

        let (_, actions) = handle_event(&mut state, &Event::SelectTechs(vec!["ReactJS".into()])).unwrap();
        assert!(actions.is_empty());
        assert!(!state.is_loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn position_fix_requires_granted_permission() {
        for status in [PermissionStatus::Denied, PermissionStatus::Unknown] {
            let mut state = AppState::default();
            if status == PermissionStatus::Denied {
                handle_event(&mut state, &Event::PermissionResult { status }).unwrap();
            }

            let (render, actions) =
                handle_event(&mut state, &Event::PositionResolved(Coordinate::new(1.0, 2.0))).unwrap();

            assert!(!render);
            assert!(actions.is_empty(), "{status:?} dispatched {actions:?}");
            assert!(!state.is_loading());
            assert_eq!(state.coordinate, None);
            assert_eq!(state.coordinator.state(), CoordinatorState::Idle);
        }
    }

    #[test]
    fn failure_after_success_keeps_results_and_reports_once() {
        let mut state = located_state();
        handle_event(&mut state, &Event::PositionResolved(Coordinate::new(10.0, 20.0))).unwrap();
        handle_event(&mut state, &Event::SelectTechs(vec!["PHP".into()])).unwrap();
        let (_, a) = handle_event(&mut state, &Event::SelectTechs(vec!["Angular".into()])).unwrap();
        assert_eq!(dispatched_sequence(&a), 3);

        let ok = WorkerResponse::SearchCompleted { sequence: 3, records: vec![record("k", "kept")] };
        handle_event(&mut state, &Event::WorkerResponse(ok)).unwrap();

        let (_, a) = handle_event(&mut state, &Event::ToggleTech("VueJS".into())).unwrap();
        assert_eq!(dispatched_sequence(&a), 4);

        let failed = WorkerResponse::SearchFailed { sequence: 4, message: "status 500".into() };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failed.clone())).unwrap();
        assert_eq!(
            actions,
            vec![Action::ReportError { sequence: 4, message: "status 500".into() }]
        );

        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failed)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.results(), [record("k", "kept")]);
        assert!(!state.is_loading());
    }

    #[test]
    fn selection_before_position_is_recorded_only() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::SelectTechs(vec!["Python".into()])).unwrap();
        assert!(actions.is_empty());
        assert!(state.selection.is_selected("Python"));

        state.permission = PermissionStatus::Granted;
        let (_, actions) =
            handle_event(&mut state, &Event::PositionResolved(Coordinate::new(1.0, 2.0))).unwrap();
        let Action::PostToWorker(WorkerMessage::Search { query }) = &actions[0] else {
            panic!("expected search dispatch");
        };
        assert_eq!(query.filter.as_slice(), ["Python"]);
    }

    #[test]
    fn invalid_coordinate_is_a_position_failure() {
        let mut state = located_state();
        let (_, actions) =
            handle_event(&mut state, &Event::PositionResolved(Coordinate::new(f64::NAN, 0.0))).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.coordinate, None);
        assert!(state.position_error.is_some());
    }

    #[test]
    fn position_failure_dispatches_nothing() {
        let mut state = located_state();
        let (_, actions) =
            handle_event(&mut state, &Event::PositionFailed { error: "timeout".into() }).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.coordinator.state(), CoordinatorState::Idle);
        assert_eq!(state.position_error.as_deref(), Some("timeout"));
    }

    #[test]
    fn callout_navigates_to_known_developer() {
        let mut state = located_state();
        handle_event(&mut state, &Event::PositionResolved(Coordinate::new(10.0, 20.0))).unwrap();
        let ok = WorkerResponse::SearchCompleted { sequence: 1, records: vec![record("u1", "dev1")] };
        handle_event(&mut state, &Event::WorkerResponse(ok)).unwrap();

        let (_, actions) =
            handle_event(&mut state, &Event::CalloutActivated { developer_id: "u1".into() }).unwrap();
        assert_eq!(actions, vec![Action::Navigate { developer_username: "dev1".into() }]);

        let (_, actions) =
            handle_event(&mut state, &Event::CalloutActivated { developer_id: "nope".into() }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn catalog_query_only_renders_on_change() {
        let mut state = AppState::default();
        let (render, _) = handle_event(&mut state, &Event::CatalogQuery("re".into())).unwrap();
        assert!(render);
        let (render, _) = handle_event(&mut state, &Event::CatalogQuery("re".into())).unwrap();
        assert!(!render);
    }
}
