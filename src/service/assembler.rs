//! Turns one location's raw measurements into a live [`AqiInsight`].

use super::timestamp::parse_timestamp;
use super::trend;
use crate::aqi::{advice_for, normalize, pollutant_name, BreakpointTable, Category};
use crate::models::{AqiInsight, LocationReading, PollutantReading, Source};
use chrono::Utc;
use tracing::debug;

const UNKNOWN_COUNTRY: &str = "Unknown";

/// Builds live insights using a breakpoint table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    table: BreakpointTable,
}

impl Assembler {
    /// Returns `None` when the reading has no place name or no usable measurement.
    ///
    /// The dominant pollutant is the one with the highest AQI; on a tie the later
    /// measurement wins. The timestamp is the last parseable one seen, else now.
    pub fn assemble(&self, reading: &LocationReading) -> Option<AqiInsight> {
        let city = reading.city.as_deref().filter(|c| !c.is_empty())?;
        if reading.measurements.is_empty() {
            return None;
        }

        let mut pollutants = Vec::with_capacity(reading.measurements.len());
        let mut dominant: Option<(i32, String)> = None;
        let mut timestamp = Utc::now();

        for m in &reading.measurements {
            let Some(code) = m.parameter.as_deref().filter(|p| !p.is_empty()) else {
                debug!("Skipping measurement without a parameter code");
                continue;
            };
            let code = code.to_lowercase();
            let concentration = normalize(&code, m.value, &m.unit);
            let aqi = self.table.aqi(&code, concentration);

            if let Some(parsed) = m.last_updated.as_deref().and_then(parse_timestamp) {
                timestamp = parsed;
            }

            if dominant.as_ref().map_or(true, |(max, _)| aqi >= *max) {
                dominant = Some((aqi, code.clone()));
            }

            pollutants.push(PollutantReading {
                name: pollutant_name(&code),
                code,
                value: Some(m.value),
                unit: Some(m.unit.clone()),
                aqi: Some(aqi),
            });
        }

        if pollutants.is_empty() {
            return None;
        }

        let (overall, dominant_code) = match dominant {
            Some((aqi, code)) => (aqi, code),
            None => (0, pollutants[0].code.clone()),
        };
        let category = Category::for_aqi(overall).label();

        Some(AqiInsight {
            city: city.to_string(),
            country: reading
                .country
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            aqi: Some(overall),
            dominant_pollutant: Some(dominant_code),
            category: category.to_string(),
            advice: advice_for(category).to_string(),
            timestamp,
            coordinates: reading.coordinates,
            pollutants,
            trend: trend::recent_trend(overall),
            source: Source::Live,
        })
    }
}
