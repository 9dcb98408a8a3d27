//! Developer records and the search API's wire format.
//!
//! The remote API returns MongoDB-shaped documents (`_id`, snake_case fields,
//! a GeoJSON `location`). [`DeveloperPayload`] mirrors that shape exactly and
//! is converted into the flat [`DeveloperRecord`] used everywhere else.

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// A developer discovered near the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperRecord {
    /// Backend identifier, unique within a result set.
    pub id: String,
    pub coordinate: Coordinate,
    /// GitHub login, also the key used for profile navigation.
    pub username: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    /// Technologies in the order the developer registered them.
    pub techs: Vec<String>,
}

/// GeoJSON point as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

/// One element of the `data` array returned by `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperPayload {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub techs: Vec<String>,
    pub location: GeoPoint,
}

/// Response envelope of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponseBody {
    pub data: Vec<DeveloperPayload>,
}

impl From<DeveloperPayload> for DeveloperRecord {
    fn from(payload: DeveloperPayload) -> Self {
        Self {
            id: payload.id,
            coordinate: Coordinate::from_lon_lat(payload.location.coordinates),
            username: payload.username,
            bio: payload.bio,
            avatar_url: payload.avatar_url,
            techs: payload.techs,
        }
    }
}

impl SearchResponseBody {
    /// Converts the envelope into records, preserving backend order.
    #[must_use]
    pub fn into_records(self) -> Vec<DeveloperRecord> {
        self.data.into_iter().map(DeveloperRecord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_document() {
        let body: SearchResponseBody = serde_json::from_str(
            r#"{"data":[{"id":"u1","techs":["Python"],"location":{"coordinates":[20.0,10.0]},"username":"dev1"}]}"#,
        )
        .unwrap();

        let records = body.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "u1");
        assert_eq!(records[0].coordinate, Coordinate::new(10.0, 20.0));
        assert_eq!(records[0].bio, None);
        assert_eq!(records[0].avatar_url, "");
    }

    #[test]
    fn decodes_backend_document() {
        let body: SearchResponseBody = serde_json::from_str(
            r#"{"data":[{
                "_id":"5e7a","username":"octocat","bio":null,
                "avatar_url":"https://avatars.example/octocat.png",
                "techs":["ReactJS","Node.js"],
                "location":{"type":"Point","coordinates":[-46.63,-23.55]},
                "__v":0
            }]}"#,
        )
        .unwrap();

        let record = &body.into_records()[0];
        assert_eq!(record.id, "5e7a");
        assert_eq!(record.techs, vec!["ReactJS", "Node.js"]);
        assert_eq!(record.coordinate.latitude, -23.55);
    }

    #[test]
    fn missing_location_is_an_error() {
        let result = serde_json::from_str::<SearchResponseBody>(
            r#"{"data":[{"_id":"x","username":"nobody"}]}"#,
        );
        assert!(result.is_err());
    }
}
