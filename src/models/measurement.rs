//! Provider-neutral measurement records, produced per request and never stored.

use super::Coordinates;

/// A raw pollutant observation as the provider reported it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurement {
    /// Pollutant code; readings without one are skipped.
    pub parameter: Option<String>,
    pub value: f64,
    /// Free-form unit label, e.g. `ppm`, `ppb`, `µg/m³`.
    pub unit: String,
    /// Observation time as reported (ISO 8601 expected, not guaranteed).
    pub last_updated: Option<String>,
}

#[cfg(test)]
impl Measurement {
    pub fn new(parameter: &str, value: f64, unit: &str) -> Self {
        Self {
            parameter: Some(parameter.to_string()),
            value,
            unit: unit.to_string(),
            last_updated: None,
        }
    }

    pub fn at(mut self, last_updated: &str) -> Self {
        self.last_updated = Some(last_updated.to_string());
        self
    }
}

/// All measurements the provider returned for one location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationReading {
    /// Place name reported by the provider (city, or station when no city is given).
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub measurements: Vec<Measurement>,
}
