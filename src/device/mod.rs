//! Device collaborators: location permission and position fixes.
//!
//! These traits are the boundary to the platform's location services. The
//! runtime calls each of them at most once per launch, in order: permission
//! first, then a single position fetch if permission was granted.
//!
//! # Modules
//!
//! - [`fixed`]: A device with a predetermined answer, used by the headless
//!   host and by tests

pub mod fixed;

pub use fixed::FixedDevice;

use crate::domain::{Coordinate, Result};
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Outcome of the location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// The prompt has not been answered yet.
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Requests the location capability from the platform.
pub trait PermissionGate: Send + Sync {
    /// Shows the OS prompt (if needed) and resolves with the user's answer.
    fn request_location_permission(&self) -> BoxFuture<'static, PermissionStatus>;
}

/// Produces a one-shot position fix.
pub trait PositionProvider: Send + Sync {
    /// Fetches the current position.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::PositionUnavailable`](crate::DevRadarError::PositionUnavailable)
    /// when no fix can be obtained.
    fn current_position(&self, high_accuracy: bool) -> BoxFuture<'static, Result<Coordinate>>;
}
