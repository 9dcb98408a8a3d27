//! Device stand-in with a predetermined permission answer and position.

use super::{PermissionGate, PermissionStatus, PositionProvider};
use crate::domain::{Coordinate, DevRadarError, Result};
use futures_util::future::BoxFuture;

/// A device that always answers the same way.
///
/// The headless host uses it with the coordinate given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDevice {
    permission: PermissionStatus,
    position: Option<Coordinate>,
}

impl FixedDevice {
    /// A device that grants permission and reports `position`.
    #[must_use]
    pub const fn at(position: Coordinate) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some(position),
        }
    }

    /// A device whose user refuses the permission prompt.
    #[must_use]
    pub const fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: None,
        }
    }

    /// A device that grants permission but never gets a fix.
    #[must_use]
    pub const fn without_fix() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: None,
        }
    }
}

impl PermissionGate for FixedDevice {
    fn request_location_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let status = self.permission;
        Box::pin(async move { status })
    }
}

impl PositionProvider for FixedDevice {
    fn current_position(&self, high_accuracy: bool) -> BoxFuture<'static, Result<Coordinate>> {
        let position = self.position;
        Box::pin(async move {
            tracing::debug!(high_accuracy, "fixed device position requested");
            position.ok_or_else(|| DevRadarError::PositionUnavailable("no fix available".to_string()))
        })
    }
}
