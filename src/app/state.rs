//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the map
//! screen shows: permission outcome, position fix, technology selection and
//! the search coordinator with its result set. It is mutated only by the
//! event handler and exposed to presenters through computed view models.
//!
//! # State Components
//!
//! - **Permission**: Outcome of the location prompt
//! - **Coordinate**: Position fix, present once permission and position succeed
//! - **Selection**: Technologies picked in the multi-select
//! - **Coordinator**: Sequenced searches, accepted results, loading overlay
//! - **Catalog**: Selectable technologies and the picker's search input
//!
//! # Example
//!
//! ```rust
//! use devradar::app::AppState;
//!
//! let state = AppState::default();
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.markers.is_empty());
//! assert!(!viewmodel.overlay.visible);
//! ```

use super::actions::Action;
use super::catalog::TechCatalog;
use super::coordinator::SearchCoordinator;
use super::selection::FilterSelection;
use crate::device::PermissionStatus;
use crate::domain::{Coordinate, DevRadarError, DeveloperRecord, TechFilter};
use crate::ui::viewmodel::{CalloutView, EmptyState, MapViewModel, MarkerView, OptionView, OverlayView, SelectionView};
use crate::worker::WorkerMessage;

const DENIED_SUBTITLE: &str = "Enable location access to find developers nearby";
const UNAVAILABLE_MESSAGE: &str = "Could not determine your position";

/// User-facing strings substituted into view models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Shown in a callout when the developer has no bio.
    pub bio_placeholder: String,
    /// Text of the loading overlay.
    pub loading: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            bio_placeholder: "(sem bio)".to_string(),
            loading: "Carregando...".to_string(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Outcome of the location permission prompt.
    pub permission: PermissionStatus,

    /// Position fix used as the center of every search.
    ///
    /// `None` until the position provider succeeds; searches are never
    /// triggered without it.
    pub coordinate: Option<Coordinate>,

    /// Why the position fix failed, if it did.
    pub position_error: Option<String>,

    /// Technologies selected in the picker.
    pub selection: FilterSelection,

    /// Search sequencing, accepted results and overlay visibility.
    pub coordinator: SearchCoordinator,

    /// Technologies offered by the picker.
    pub catalog: TechCatalog,

    /// Current text of the picker's search input.
    pub catalog_query: String,

    /// Whether position fixes should request the highest accuracy.
    pub high_accuracy: bool,

    /// Strings used when building view models.
    pub labels: Labels,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TechCatalog::default(), Labels::default())
    }
}

impl AppState {
    /// Creates a state with nothing acquired yet.
    #[must_use]
    pub fn new(catalog: TechCatalog, labels: Labels) -> Self {
        Self {
            permission: PermissionStatus::Unknown,
            coordinate: None,
            position_error: None,
            selection: FilterSelection::new(),
            coordinator: SearchCoordinator::new(),
            catalog,
            catalog_query: String::new(),
            high_accuracy: true,
            labels,
        }
    }

    /// Triggers a search around the current coordinate.
    ///
    /// Returns the worker action to dispatch, or `None` when no position fix
    /// exists yet (the filter is still recorded by the caller).
    pub fn trigger_search(&mut self, filter: TechFilter) -> Option<Action> {
        let Some(coordinate) = self.coordinate else {
            tracing::debug!(tech_count = filter.len(), "no position fix yet, search deferred");
            return None;
        };

        let query = self.coordinator.trigger(coordinate, filter);
        Some(Action::PostToWorker(WorkerMessage::search(query)))
    }

    /// The accepted result set.
    #[must_use]
    pub fn results(&self) -> &[DeveloperRecord] {
        self.coordinator.results()
    }

    /// Whether the loading overlay is shown.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.coordinator.is_loading()
    }

    /// Computes the map screen from current state.
    ///
    /// A denied permission or a failed position fix (with no earlier fix)
    /// yields an empty state instead of markers.
    #[must_use]
    pub fn compute_viewmodel(&self) -> MapViewModel {
        let _span = tracing::trace_span!(
            "compute_viewmodel",
            results = self.results().len(),
            loading = self.is_loading()
        )
        .entered();

        MapViewModel {
            region: self.coordinate,
            markers: self.results().iter().map(|record| self.compute_marker(record)).collect(),
            overlay: OverlayView {
                visible: self.is_loading(),
                label: self.labels.loading.clone(),
            },
            selection: self.compute_selection(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_marker(&self, record: &DeveloperRecord) -> MarkerView {
        MarkerView {
            developer_id: record.id.clone(),
            coordinate: record.coordinate,
            avatar_url: record.avatar_url.clone(),
            callout: CalloutView {
                username: record.username.clone(),
                bio: record
                    .bio
                    .clone()
                    .unwrap_or_else(|| self.labels.bio_placeholder.clone()),
                techs: record.techs.clone(),
            },
        }
    }

    fn compute_selection(&self) -> SelectionView {
        let options = self
            .catalog
            .search(&self.catalog_query)
            .into_iter()
            .map(|item| OptionView {
                id: item.id.clone(),
                name: item.name.clone(),
                is_selected: self.selection.is_selected(&item.id),
            })
            .collect();

        SelectionView {
            selected: self.selection.snapshot().as_slice().to_vec(),
            options,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.permission == PermissionStatus::Denied {
            return Some(EmptyState {
                message: DevRadarError::PermissionDenied.to_string(),
                subtitle: DENIED_SUBTITLE.to_string(),
            });
        }

        match (&self.coordinate, &self.position_error) {
            (None, Some(error)) => Some(EmptyState {
                message: UNAVAILABLE_MESSAGE.to_string(),
                subtitle: error.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, bio: Option<&str>) -> DeveloperRecord {
        DeveloperRecord {
            id: id.to_string(),
            coordinate: Coordinate::new(-23.55, -46.63),
            username: format!("{id}-login"),
            bio: bio.map(ToString::to_string),
            avatar_url: format!("https://avatars.example/{id}.png"),
            techs: vec!["ReactJS".to_string(), "Node.js".to_string()],
        }
    }

    #[test]
    fn no_search_without_coordinate() {
        let mut state = AppState::default();
        assert_eq!(state.trigger_search(TechFilter::empty()), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn markers_follow_results_with_placeholder_bio() {
        let mut state = AppState::default();
        state.coordinate = Some(Coordinate::new(-23.55, -46.63));
        state.trigger_search(TechFilter::empty());
        state.coordinator.accept(1, vec![record("a", Some("Rustacean")), record("b", None)]);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.markers.len(), 2);
        assert_eq!(vm.markers[0].callout.bio, "Rustacean");
        assert_eq!(vm.markers[1].callout.bio, "(sem bio)");
        assert_eq!(vm.markers[1].callout.techs, ["ReactJS", "Node.js"]);
        assert!(!vm.overlay.visible);
        assert_eq!(vm.region, Some(Coordinate::new(-23.55, -46.63)));
    }

    #[test]
    fn overlay_reflects_pending_search() {
        let mut state = AppState::default();
        state.coordinate = Some(Coordinate::new(0.0, 0.0));
        state.trigger_search(TechFilter::empty());

        let vm = state.compute_viewmodel();
        assert!(vm.overlay.visible);
        assert_eq!(vm.overlay.label, "Carregando...");
    }

    #[test]
    fn picker_marks_selected_options() {
        let mut state = AppState::default();
        state.selection.set_selected(["PHP"]);
        state.catalog_query = "p".to_string();

        let vm = state.compute_viewmodel();
        assert_eq!(vm.selection.selected, ["PHP"]);
        let php = vm.selection.options.iter().find(|o| o.id == "PHP").unwrap();
        assert!(php.is_selected);
        assert!(vm.selection.options.iter().all(|o| o.id == "PHP" || !o.is_selected));
    }

    #[test]
    fn denied_permission_yields_empty_state() {
        let mut state = AppState::default();
        state.permission = PermissionStatus::Denied;

        let empty = state.compute_viewmodel().empty_state.unwrap();
        assert_eq!(empty.message, "Location permission denied");
    }

    #[test]
    fn position_failure_yields_empty_state() {
        let mut state = AppState::default();
        state.permission = PermissionStatus::Granted;
        state.position_error = Some("Position unavailable: no fix available".to_string());

        let empty = state.compute_viewmodel().empty_state.unwrap();
        assert_eq!(empty.message, UNAVAILABLE_MESSAGE);
        assert!(empty.subtitle.contains("no fix"));
    }
}
