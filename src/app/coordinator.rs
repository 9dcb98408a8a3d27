//! Sequenced search coordination.
//!
//! [`SearchCoordinator`] turns every search trigger into a [`SearchQuery`]
//! tagged with a strictly increasing sequence number, and reconciles
//! completions against the most recent trigger. Responses are applied by
//! sequence, never by arrival order: a slow early response can never
//! overwrite a fast later one.
//!
//! # State Machine
//!
//! ```text
//!            trigger(n)              accept(n) / fail(n)
//!   Idle ─────────────▶ Pending(n) ─────────────────────▶ Settled(n)
//!                         │   ▲                              │
//!                         └───┘ trigger(n+1)                 │
//!                         ▲─────────────────────────────────┘
//!                                    trigger(n+1)
//! ```
//!
//! Completions for any sequence other than the active one are discarded
//! without touching the result set or the loading overlay.
//!
//! # Example
//!
//! ```rust
//! use devradar::app::coordinator::{Reconciliation, SearchCoordinator};
//! use devradar::domain::{Coordinate, TechFilter};
//!
//! let mut coordinator = SearchCoordinator::new();
//! let here = Coordinate::new(10.0, 20.0);
//!
//! let first = coordinator.trigger(here, TechFilter::empty());
//! let second = coordinator.trigger(here, TechFilter::from_tags(["PHP"]));
//!
//! assert_eq!(coordinator.accept(second.sequence, vec![]), Reconciliation::Applied);
//! assert_eq!(coordinator.accept(first.sequence, vec![]), Reconciliation::Discarded);
//! assert!(!coordinator.is_loading());
//! ```

use crate::domain::{Coordinate, DeveloperRecord, SearchQuery, TechFilter};

/// Lifecycle of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    /// No search has been triggered yet.
    #[default]
    Idle,
    /// The search with this sequence is in flight.
    Pending(u64),
    /// The search with this sequence has completed (successfully or not).
    Settled(u64),
}

/// Outcome of reconciling a completion against the active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The completion belonged to the active search and was applied.
    Applied,
    /// The completion was stale (or unknown) and was ignored.
    Discarded,
}

/// Owner of the result set, the loading overlay and the sequence counter.
#[derive(Debug, Clone, Default)]
pub struct SearchCoordinator {
    last_sequence: u64,
    state: CoordinatorState,
    results: Vec<DeveloperRecord>,
    overlay_visible: bool,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search and returns the query to dispatch.
    ///
    /// Assigns `last_sequence + 1`, marks it pending and shows the loading
    /// overlay. Any search still in flight is superseded from this point on.
    pub fn trigger(&mut self, coordinate: Coordinate, filter: TechFilter) -> SearchQuery {
        self.last_sequence += 1;
        let sequence = self.last_sequence;

        self.state = CoordinatorState::Pending(sequence);
        self.overlay_visible = true;

        tracing::debug!(
            sequence,
            tech_count = filter.len(),
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "search triggered"
        );

        SearchQuery::new(coordinate, filter, sequence)
    }

    /// Applies a successful response if it belongs to the active search.
    ///
    /// On [`Reconciliation::Applied`] the result set is replaced, the state
    /// becomes `Settled(sequence)` and the overlay is hidden. Stale responses
    /// leave everything untouched.
    pub fn accept(&mut self, sequence: u64, records: Vec<DeveloperRecord>) -> Reconciliation {
        if !self.is_pending(sequence) {
            self.log_discard(sequence, "response");
            return Reconciliation::Discarded;
        }

        tracing::debug!(sequence, record_count = records.len(), "search settled");

        self.results = records;
        self.state = CoordinatorState::Settled(sequence);
        self.overlay_visible = false;
        Reconciliation::Applied
    }

    /// Records a failed search if it belongs to the active search.
    ///
    /// The overlay is hidden and the previous result set stays in place.
    /// Callers report the error only on [`Reconciliation::Applied`], which
    /// guarantees a single report per failed search.
    pub fn fail(&mut self, sequence: u64, error: &str) -> Reconciliation {
        if !self.is_pending(sequence) {
            self.log_discard(sequence, "failure");
            return Reconciliation::Discarded;
        }

        tracing::debug!(sequence, error = %error, kept_results = self.results.len(), "search failed");

        self.state = CoordinatorState::Settled(sequence);
        self.overlay_visible = false;
        Reconciliation::Applied
    }

    fn is_pending(&self, sequence: u64) -> bool {
        self.state == CoordinatorState::Pending(sequence)
    }

    fn log_discard(&self, sequence: u64, kind: &str) {
        if sequence > self.last_sequence {
            tracing::warn!(sequence, last_sequence = self.last_sequence, kind, "completion for a sequence never issued");
        } else {
            tracing::debug!(sequence, active = self.active_sequence(), kind, "stale completion discarded");
        }
    }

    /// Sequence number of the most recent trigger, if any.
    #[must_use]
    pub const fn active_sequence(&self) -> Option<u64> {
        match self.state {
            CoordinatorState::Idle => None,
            CoordinatorState::Pending(seq) | CoordinatorState::Settled(seq) => Some(seq),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CoordinatorState {
        self.state
    }

    /// The accepted result set.
    #[must_use]
    pub fn results(&self) -> &[DeveloperRecord] {
        &self.results
    }

    /// Loading overlay visibility; `true` exactly while the active search is pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.overlay_visible
    }

    /// Looks up a record of the current result set by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DeveloperRecord> {
        self.results.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinate {
        Coordinate::new(10.0, 20.0)
    }

    fn record(id: &str) -> DeveloperRecord {
        DeveloperRecord {
            id: id.to_string(),
            coordinate: Coordinate::new(10.0, 20.0),
            username: format!("{id}-login"),
            bio: None,
            avatar_url: String::new(),
            techs: vec!["Python".to_string()],
        }
    }

    #[test]
    fn starts_idle_and_hidden() {
        let coordinator = SearchCoordinator::new();
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(coordinator.active_sequence(), None);
        assert!(!coordinator.is_loading());
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn trigger_assigns_increasing_sequences() {
        let mut coordinator = SearchCoordinator::new();
        let a = coordinator.trigger(here(), TechFilter::empty());
        let b = coordinator.trigger(here(), TechFilter::empty());

        assert_eq!(a.sequence, 1);
        assert_eq!(b.sequence, 2);
        assert_eq!(a.request_body(), b.request_body());
        assert_eq!(coordinator.state(), CoordinatorState::Pending(2));
        assert!(coordinator.is_loading());
    }

    #[test]
    fn late_response_never_overwrites_newer_results() {
        let mut coordinator = SearchCoordinator::new();
        let _first = coordinator.trigger(here(), TechFilter::empty());
        let second = coordinator.trigger(here(), TechFilter::from_tags(["PHP"]));
        let third = coordinator.trigger(here(), TechFilter::from_tags(["PHP", "Python"]));

        assert_eq!(coordinator.accept(third.sequence, vec![record("three")]), Reconciliation::Applied);
        assert_eq!(coordinator.accept(second.sequence, vec![record("two")]), Reconciliation::Discarded);

        assert_eq!(coordinator.results(), [record("three")]);
        assert_eq!(coordinator.state(), CoordinatorState::Settled(3));
        assert!(!coordinator.is_loading());
    }

    #[test]
    fn stale_response_keeps_overlay_for_pending_search() {
        let mut coordinator = SearchCoordinator::new();
        let first = coordinator.trigger(here(), TechFilter::empty());
        coordinator.trigger(here(), TechFilter::from_tags(["Angular"]));

        assert_eq!(coordinator.accept(first.sequence, vec![record("one")]), Reconciliation::Discarded);
        assert!(coordinator.is_loading());
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn failure_keeps_last_good_results() {
        let mut coordinator = SearchCoordinator::new();
        let ok = coordinator.trigger(here(), TechFilter::empty());
        coordinator.accept(ok.sequence, vec![record("kept")]);

        let failing = coordinator.trigger(here(), TechFilter::from_tags(["VueJS"]));
        assert_eq!(coordinator.fail(failing.sequence, "connection reset"), Reconciliation::Applied);

        assert_eq!(coordinator.results(), [record("kept")]);
        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.state(), CoordinatorState::Settled(failing.sequence));
    }

    #[test]
    fn failure_is_applied_once() {
        let mut coordinator = SearchCoordinator::new();
        let query = coordinator.trigger(here(), TechFilter::empty());

        assert_eq!(coordinator.fail(query.sequence, "boom"), Reconciliation::Applied);
        assert_eq!(coordinator.fail(query.sequence, "boom"), Reconciliation::Discarded);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut coordinator = SearchCoordinator::new();
        let first = coordinator.trigger(here(), TechFilter::empty());
        coordinator.trigger(here(), TechFilter::empty());

        assert_eq!(coordinator.fail(first.sequence, "timeout"), Reconciliation::Discarded);
        assert!(coordinator.is_loading());
    }

    #[test]
    fn unknown_sequence_is_discarded() {
        let mut coordinator = SearchCoordinator::new();
        coordinator.trigger(here(), TechFilter::empty());

        assert_eq!(coordinator.accept(42, vec![record("ghost")]), Reconciliation::Discarded);
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn overlay_tracks_pending_state() {
        let mut coordinator = SearchCoordinator::new();
        let sequences: Vec<u64> = (0..4)
            .map(|_| coordinator.trigger(here(), TechFilter::empty()).sequence)
            .collect();

        for &seq in sequences.iter().rev() {
            coordinator.accept(seq, vec![]);
            let pending = matches!(coordinator.state(), CoordinatorState::Pending(_));
            assert_eq!(coordinator.is_loading(), pending);
        }
    }
}
