//! Defines deserialization structs for OpenAQ API payloads.
//!
//! Includes structs for:
//! - The `/latest` endpoint, which has been served in several shapes over time
//!   (`results` or `data`, `measurements` or `parameters`, assorted timestamp keys).
//! - The v3 `/locations` and `/locations/{id}/latest` endpoints.
//!
//! Both convert into the provider-neutral [`LocationReading`].

use super::{Coordinates, LocationReading, Measurement};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Represents geographical coordinates as sent by OpenAQ (either half may be missing).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinatesV3 {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CoordinatesV3 {
    /// Usable only when both halves are present.
    pub fn complete(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// Represents a V3 datetime object; only the UTC half is read.
#[derive(Debug, Clone, Deserialize)]
pub struct DatetimeObject {
    pub utc: String,
}

/// A timestamp that arrives either as a plain string or as a V3 datetime object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimestampField {
    Text(String),
    Object(DatetimeObject),
}

impl TimestampField {
    pub fn into_utc_string(self) -> String {
        match self {
            TimestampField::Text(s) => s,
            TimestampField::Object(dt) => dt.utc,
        }
    }
}

// --- `/latest` (single query) ---
//
// Each alternate key is its own field: when a payload carries several, the first
// non-empty one wins instead of serde rejecting a duplicate.

/// Response structure for the `/latest` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestPayload {
    #[serde(default)]
    pub results: Option<Vec<LatestEntry>>,
    #[serde(default)]
    pub data: Option<Vec<LatestEntry>>,
}

impl LatestPayload {
    /// `results`, else `data`.
    pub fn into_entries(self) -> Vec<LatestEntry> {
        first_non_empty(self.results, self.data)
    }
}

/// One location in a `/latest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestEntry {
    pub city: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<CoordinatesV3>,
    #[serde(default)]
    pub measurements: Option<Vec<LatestMeasurement>>,
    #[serde(default)]
    pub parameters: Option<Vec<LatestMeasurement>>,
}

/// One pollutant value in a `/latest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestMeasurement {
    pub parameter: Option<String>,
    /// A number, or a numeric string.
    pub value: Option<Value>,
    pub unit: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<TimestampField>,
    #[serde(rename = "last_updated")]
    pub last_updated_snake: Option<TimestampField>,
    pub datetime: Option<TimestampField>,
}

impl LatestMeasurement {
    /// Missing or null is zero; anything that is not a number is `None`.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            None | Some(Value::Null) => Some(0.0),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        }
    }

    /// `lastUpdated`, else `last_updated`, else `datetime`, skipping empty strings.
    pub fn timestamp(self) -> Option<String> {
        [self.last_updated, self.last_updated_snake, self.datetime]
            .into_iter()
            .flatten()
            .map(TimestampField::into_utc_string)
            .find(|ts| !ts.is_empty())
    }
}

fn first_non_empty<T>(first: Option<Vec<T>>, second: Option<Vec<T>>) -> Vec<T> {
    match first {
        Some(items) if !items.is_empty() => items,
        _ => second.unwrap_or_default(),
    }
}

impl From<LatestEntry> for LocationReading {
    fn from(entry: LatestEntry) -> Self {
        let city = entry
            .city
            .filter(|c| !c.is_empty())
            .or(entry.location.filter(|l| !l.is_empty()));

        let measurements = first_non_empty(entry.measurements, entry.parameters)
            .into_iter()
            .filter_map(|m| {
                let Some(value) = m.numeric_value() else {
                    debug!("Dropping non-numeric value for {:?}", m.parameter);
                    return None;
                };
                Some(Measurement {
                    parameter: m.parameter.clone(),
                    value,
                    unit: m.unit.clone().unwrap_or_default(),
                    last_updated: m.timestamp(),
                })
            })
            .collect();

        Self {
            city,
            country: entry.country,
            coordinates: entry.coordinates.and_then(|c| c.complete()),
            measurements,
        }
    }
}

// --- v3 `/locations` then `/locations/{id}/latest` ---

/// Base representation of a parameter (from V3 schema).
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterBase {
    pub name: String,
    pub units: String,
}

/// Base representation of a country (from V3 schema).
#[derive(Debug, Clone, Deserialize)]
pub struct CountryBase {
    pub code: Option<String>,
}

/// Base representation of a sensor (from V3 schema).
#[derive(Debug, Clone, Deserialize)]
pub struct SensorBase {
    pub id: i64,
    pub parameter: ParameterBase,
}

/// Response structure for the `/v3/locations` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub results: Vec<Location>,
}

/// Represents a single location from the `/v3/locations` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: Option<String>,
    /// Often the city name.
    pub locality: Option<String>,
    pub country: Option<CountryBase>,
    pub coordinates: Option<CoordinatesV3>,
    #[serde(default)]
    pub sensors: Vec<SensorBase>,
}

/// Response structure for the `/v3/locations/{id}/latest` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub results: Vec<Latest>,
}

/// Represents a single latest measurement value for a sensor at a location.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Latest {
    pub datetime: Option<DatetimeObject>,
    pub value: f64,
    pub sensors_id: i64,
}

impl Location {
    /// Joins latest values onto this location's sensors to recover parameter and unit.
    /// Values from sensors the location does not list are dropped.
    pub fn reading_from(&self, latest: Vec<Latest>) -> LocationReading {
        let sensors: HashMap<i64, &ParameterBase> = self
            .sensors
            .iter()
            .map(|s| (s.id, &s.parameter))
            .collect();

        let measurements = latest
            .into_iter()
            .filter_map(|l| {
                let parameter = sensors.get(&l.sensors_id)?;
                Some(Measurement {
                    parameter: Some(parameter.name.clone()),
                    value: l.value,
                    unit: parameter.units.clone(),
                    last_updated: l.datetime.map(|dt| dt.utc),
                })
            })
            .collect();

        LocationReading {
            city: self
                .locality
                .clone()
                .filter(|l| !l.is_empty())
                .or_else(|| self.name.clone()),
            country: self.country.as_ref().and_then(|c| c.code.clone()),
            coordinates: self.coordinates.and_then(|c| c.complete()),
            measurements,
        }
    }
}
