//! Technology filters and sequenced search queries.

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// An ordered set of technology tags.
///
/// Tags are unique; insertion order is kept because it is both the display
/// order and the order sent to the API. An empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechFilter(Vec<String>);

impl TechFilter {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Builds a filter, dropping repeated tags (first occurrence wins).
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::empty();
        for tag in tags {
            filter.insert(tag.into());
        }
        filter
    }

    /// Adds a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: String) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Removes a tag. Returns `false` if it was absent.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// A proximity query tagged with its dispatch sequence number.
///
/// Immutable once created. Two queries with the same coordinate and filter
/// differ only by `sequence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub coordinate: Coordinate,
    pub filter: TechFilter,
    pub sequence: u64,
}

impl SearchQuery {
    #[must_use]
    pub const fn new(coordinate: Coordinate, filter: TechFilter, sequence: u64) -> Self {
        Self {
            coordinate,
            filter,
            sequence,
        }
    }

    /// Returns the JSON body for `POST /users`.
    #[must_use]
    pub fn request_body(&self) -> SearchRequestBody {
        SearchRequestBody {
            techs: self.filter.as_slice().to_vec(),
            latitude: self.coordinate.latitude,
            longitude: self.coordinate.longitude,
        }
    }
}

/// Request body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestBody {
    pub techs: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}
