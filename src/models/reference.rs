//! Static reference records: supported cities and pre-authored fallback entries.

use super::Coordinates;
use serde::{Deserialize, Serialize};

/// A city the service knows about.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct City {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Degraded-response template for one city. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FallbackRecord {
    pub city: Option<String>,
    pub country: Option<String>,
    /// ISO 8601; parsed lazily so a malformed value only costs the timestamp.
    pub timestamp: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub message: Option<String>,
}
