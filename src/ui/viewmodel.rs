//! View model types representing the renderable map screen.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by a [`MapPresenter`]. They
//! contain no business logic, only display-ready data: placeholder text is
//! already substituted and overlay visibility already derived.
//!
//! [`MapPresenter`]: crate::ui::MapPresenter
//!
//! # Example
//!
//! ```rust
//! use devradar::domain::Coordinate;
//! use devradar::ui::viewmodel::{CalloutView, MapViewModel, MarkerView, OverlayView, SelectionView};
//!
//! let vm = MapViewModel {
//!     region: Some(Coordinate::new(-23.55, -46.63)),
//!     markers: vec![MarkerView {
//!         developer_id: "5e7a".to_string(),
//!         coordinate: Coordinate::new(-23.55, -46.63),
//!         avatar_url: "https://avatars.example/octocat.png".to_string(),
//!         callout: CalloutView {
//!             username: "octocat".to_string(),
//!             bio: "(sem bio)".to_string(),
//!             techs: vec!["ReactJS".to_string()],
//!         },
//!     }],
//!     overlay: OverlayView { visible: false, label: "Carregando...".to_string() },
//!     selection: SelectionView { selected: vec![], options: vec![] },
//!     empty_state: None,
//! };
//! assert_eq!(vm.markers.len(), 1);
//! ```

use crate::domain::Coordinate;

/// Complete view model of the map screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewModel {
    /// Center of the map; `None` until a position fix exists.
    pub region: Option<Coordinate>,

    /// One marker per developer of the accepted result set, in result order.
    pub markers: Vec<MarkerView>,

    /// Loading overlay.
    pub overlay: OverlayView,

    /// Technology picker state.
    pub selection: SelectionView,

    /// Message shown instead of the map when the flow cannot start.
    pub empty_state: Option<EmptyState>,
}

/// A developer pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    /// Id forwarded with `CalloutActivated` when the callout is tapped.
    pub developer_id: String,
    pub coordinate: Coordinate,
    pub avatar_url: String,
    pub callout: CalloutView,
}

/// Profile bubble attached to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutView {
    pub username: String,
    /// The developer's bio, or the configured placeholder when absent.
    pub bio: String,
    pub techs: Vec<String>,
}

/// Full-screen loading indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub visible: bool,
    pub label: String,
}

/// State of the multi-select technology picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    /// Selected tags in selection order.
    pub selected: Vec<String>,

    /// Catalog entries matching the picker's search input.
    pub options: Vec<OptionView>,
}

/// One row of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub id: String,
    pub name: String,
    pub is_selected: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "Location permission denied").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
