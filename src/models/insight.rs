//! Output records served by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographical coordinates of a city or station.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where an insight's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Derived from provider measurements during this request.
    Live,
    /// Built from bundled reference data; carries no AQI.
    Fallback,
}

/// One pollutant's contribution to an insight.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollutantReading {
    /// Lowercase pollutant code, e.g. `pm25`.
    pub code: String,
    pub name: String,
    /// Raw value as reported by the provider, before unit normalization.
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub aqi: Option<i32>,
}

/// One hourly point of the synthetic trend line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendPoint {
    /// Hour of day, `HH:MM` (UTC).
    pub time: String,
    pub aqi: i32,
}

/// Air quality summary for one city, live or degraded.
///
/// `source == Live` always has at least one pollutant and an `aqi`; `source == Fallback`
/// never has pollutants, trend, `aqi` or a dominant pollutant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiInsight {
    pub city: String,
    pub country: String,
    pub aqi: Option<i32>,
    pub dominant_pollutant: Option<String>,
    pub category: String,
    pub advice: String,
    pub timestamp: DateTime<Utc>,
    pub coordinates: Option<Coordinates>,
    pub pollutants: Vec<PollutantReading>,
    pub trend: Vec<TrendPoint>,
    pub source: Source,
}

/// `{ "data": ... }` envelope used by every API response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
