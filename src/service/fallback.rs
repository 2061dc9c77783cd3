//! Degraded insights for when live data cannot be had.
//!
//! `resolve` never fails: any city string, known or not, yields a well-formed
//! `source = fallback` record. Field precedence:
//!
//! | field        | 1st                   | 2nd              | 3rd              |
//! |--------------|-----------------------|------------------|------------------|
//! | timestamp    | record (if parseable) | now              |                  |
//! | coordinates  | record                | city list        | none             |
//! | advice       | caller's reason       | record message   | generic message  |
//! | city/country | record                | city list        | input/`Unknown`  |

use super::timestamp::parse_timestamp;
use crate::aqi::UNAVAILABLE;
use crate::models::{AqiInsight, Source};
use crate::reference::ReferenceData;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub const GENERIC_FALLBACK_MESSAGE: &str =
    "Live air quality data is temporarily unavailable for this location. Please try again later.";

const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct FallbackResolver {
    reference: Arc<ReferenceData>,
}

impl FallbackResolver {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn resolve(&self, city: &str, reason: Option<&str>) -> AqiInsight {
        let record = self.reference.find_fallback(city);
        let known = self.reference.find_city(city);
        info!(
            city,
            has_record = record.is_some(),
            known_city = known.is_some(),
            reason = reason.unwrap_or("no live data"),
            "Serving fallback insight"
        );

        let timestamp = record
            .and_then(|r| r.timestamp.as_deref())
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        let coordinates = record
            .and_then(|r| r.coordinates)
            .or_else(|| known.map(|c| c.coordinates()));

        let advice = reason
            .filter(|r| !r.is_empty())
            .or_else(|| record.and_then(|r| r.message.as_deref()).filter(|m| !m.is_empty()))
            .unwrap_or(GENERIC_FALLBACK_MESSAGE)
            .to_string();

        let city_name = record
            .and_then(|r| r.city.clone())
            .filter(|c| !c.is_empty())
            .or_else(|| known.map(|c| c.city.clone()))
            .unwrap_or_else(|| city.to_string());

        let country = record
            .and_then(|r| r.country.clone())
            .filter(|c| !c.is_empty())
            .or_else(|| known.map(|c| c.country.clone()))
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        AqiInsight {
            city: city_name,
            country,
            aqi: None,
            dominant_pollutant: None,
            category: UNAVAILABLE.to_string(),
            advice,
            timestamp,
            coordinates,
            pollutants: Vec::new(),
            trend: Vec::new(),
            source: Source::Fallback,
        }
    }
}
