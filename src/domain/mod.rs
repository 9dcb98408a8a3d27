//! Domain layer for DevRadar.
//!
//! This module contains the core value types of the discovery flow,
//! independent of the device, HTTP or presentation collaborators.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`coordinate`]: Geographic position captured from the device
//! - [`developer`]: Developer records and their wire format
//! - [`query`]: Technology filters and sequenced search queries
//!
//! # Examples
//!
//! ```
//! use devradar::domain::{Coordinate, SearchQuery, TechFilter};
//!
//! let here = Coordinate::new(-23.55, -46.63);
//! let query = SearchQuery::new(here, TechFilter::from_tags(["Rust"]), 1);
//! assert_eq!(query.sequence, 1);
//! ```

pub mod coordinate;
pub mod developer;
pub mod error;
pub mod query;

pub use coordinate::Coordinate;
pub use developer::{DeveloperPayload, DeveloperRecord, SearchResponseBody};
pub use error::{DevRadarError, Result};
pub use query::{SearchQuery, SearchRequestBody, TechFilter};
