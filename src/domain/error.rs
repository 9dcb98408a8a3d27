//! Error types for DevRadar.
//!
//! This module defines the centralized error type [`DevRadarError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for DevRadar operations.
///
/// The first three variants are the failure kinds of the search flow itself.
/// The remaining ones wrap errors from the HTTP client, JSON codec, filesystem
/// and configuration layer, converted automatically with `#[from]` where a
/// source error exists.
///
/// # Examples
///
/// ```
/// use devradar::DevRadarError;
///
/// fn locate() -> Result<(), DevRadarError> {
///     Err(DevRadarError::PositionUnavailable("timed out".to_string()))
/// }
///
/// assert_eq!(locate().unwrap_err().to_string(), "Position unavailable: timed out");
/// ```
#[derive(Debug, Error)]
pub enum DevRadarError {
    /// The user refused the location permission prompt.
    ///
    /// Terminal for the search flow: no query is ever dispatched.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The device could not produce a position fix.
    ///
    /// Covers provider failures and fetches that exceed the configured
    /// position timeout. Terminal for the initial search.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// A proximity search could not be completed.
    ///
    /// Recoverable: the previous result set stays on screen.
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Transport-level failure talking to the search API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The runtime loop has exited and no longer accepts commands.
    #[error("Runtime stopped")]
    RuntimeStopped,
}

/// A specialized `Result` type for DevRadar operations.
pub type Result<T> = std::result::Result<T, DevRadarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_convert() {
        let err: DevRadarError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, DevRadarError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn io_errors_convert() {
        let err: DevRadarError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
