//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic, sitting between the
//! runtime loop and the domain/worker/device layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host / Collaborators → Events → Event Handler → State Mutations → Actions → Side Effects
//!                          ↑                                                   ↓
//!                          └──────────── permission / position / search results ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`catalog`]: Static technology catalog with picker search
//! - [`coordinator`]: Sequenced search reconciliation
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`selection`]: Multi-select technology filter state
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use devradar::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Launch)?;
//! assert_eq!(actions, vec![Action::RequestPermission]);
//! # Ok::<(), devradar::DevRadarError>(())
//! ```

pub mod actions;
pub mod catalog;
pub mod coordinator;
pub mod handler;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use catalog::TechCatalog;
pub use coordinator::{CoordinatorState, Reconciliation, SearchCoordinator};
pub use handler::{handle_event, Event};
pub use selection::FilterSelection;
pub use state::{AppState, Labels};
