//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `AirQualityProvider`: the "fetch measurements for a location" capability the
//!   service depends on.
//! - `openaq`: Client for the real OpenAQ API.

mod openaq;
#[cfg(test)]
mod openaq_test;

pub use openaq::*;

use crate::error::Result;
use crate::models::LocationReading;
use std::fmt;
use std::future::Future;

/// Candidate query for a location's latest measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name as typed by the caller.
    ByName(String),
    /// Stations within `radius_m` metres of a point.
    ByCoordinates {
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    },
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::ByName(name) => write!(f, "name '{}'", name),
            LocationQuery::ByCoordinates {
                latitude,
                longitude,
                radius_m,
            } => write!(f, "{},{} within {} m", latitude, longitude, radius_m),
        }
    }
}

/// A source of live air-quality measurements.
///
/// Implementations return zero or more location readings per query, or an error for
/// transport, status and decoding failures. Callers treat every error as recoverable.
pub trait AirQualityProvider: Send + Sync + 'static {
    /// `false` when required credentials are missing; callers skip the provider entirely.
    fn is_configured(&self) -> bool;

    fn fetch_latest(
        &self,
        query: &LocationQuery,
    ) -> impl Future<Output = Result<Vec<LocationReading>>> + Send;
}
