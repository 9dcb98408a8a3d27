//! Presentation layer.
//!
//! The map itself is drawn by the platform; this layer turns application
//! state into display-ready view models and defines the collaborator seams
//! the runtime talks to.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → MapViewModel → MapPresenter
//!                                   │
//!                       callout tap ┴→ Event::CalloutActivated → Navigator
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing the map screen
//! - [`renderer`]: [`MapPresenter`] seam and the plain-text presenter
//! - [`navigation`]: [`Navigator`] seam for profile navigation

pub mod navigation;
pub mod renderer;
pub mod viewmodel;

pub use navigation::{LogNavigator, Navigator};
pub use renderer::{render_text, MapPresenter, TextPresenter};
pub use viewmodel::{CalloutView, EmptyState, MapViewModel, MarkerView, OptionView, OverlayView, SelectionView};
