//! Request-time orchestration: provider queries, live assembly, and fallback.
//!
//! Includes:
//! - `assembler`: measurements -> live insight.
//! - `fallback`: degraded insights from reference data.
//! - `trend`: the synthetic 24-hour trend line.
//! - `timestamp`: lenient ISO 8601 parsing.

mod assembler;
mod fallback;
mod timestamp;
pub mod trend;

pub use assembler::*;
pub use fallback::*;

use crate::api::{AirQualityProvider, LocationQuery};
use crate::config::DEFAULT_SEARCH_RADIUS_M;
use crate::models::{AqiInsight, City};
use crate::reference::ReferenceData;
use std::sync::Arc;
use tracing::{info, warn};

pub const MISSING_KEY_REASON: &str =
    "OpenAQ API key is not configured (set OPENAQ_API_KEY). Showing cached information instead.";

/// Resolves a city name into an insight, live when possible.
///
/// Reference data is shared and read-only, so one service serves concurrent
/// requests without locking.
#[derive(Debug)]
pub struct AqiService<P> {
    provider: P,
    reference: Arc<ReferenceData>,
    assembler: Assembler,
    fallback: FallbackResolver,
    search_radius_m: u32,
}

impl<P: AirQualityProvider> AqiService<P> {
    pub fn new(provider: P, reference: Arc<ReferenceData>) -> Self {
        Self {
            provider,
            fallback: FallbackResolver::new(Arc::clone(&reference)),
            reference,
            assembler: Assembler::default(),
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }

    pub fn with_search_radius(mut self, radius_m: u32) -> Self {
        self.search_radius_m = radius_m;
        self
    }

    pub fn cities(&self) -> &[City] {
        self.reference.cities()
    }

    /// Current insight for `city`. Never fails.
    ///
    /// Provider failures of any kind, missing credentials and blank input all end
    /// in a `source = fallback` insight.
    pub async fn current(&self, city: &str) -> AqiInsight {
        let city = city.trim();
        if !self.provider.is_configured() {
            info!("No provider credentials; serving fallback for '{}'", city);
            return self.fallback.resolve(city, Some(MISSING_KEY_REASON));
        }

        if city.is_empty() {
            info!("Blank city; nothing to query");
            return self.fallback.resolve(city, None);
        }

        for query in self.candidate_queries(city) {
            let readings = match self.provider.fetch_latest(&query).await {
                Ok(readings) => readings,
                Err(e) => {
                    warn!("Provider query for {} failed: {}", query, e);
                    continue;
                },
            };

            // Only the first (most recent) location is considered.
            match readings.first().and_then(|r| self.assembler.assemble(r)) {
                Some(insight) => {
                    info!(
                        "Live AQI {:?} for '{}' via {}",
                        insight.aqi, insight.city, query
                    );
                    return insight;
                },
                None => info!("No usable data for {}", query),
            }
        }

        self.fallback.resolve(city, None)
    }

    /// By name first, then by the known city's coordinates.
    fn candidate_queries(&self, city: &str) -> Vec<LocationQuery> {
        let mut queries = vec![LocationQuery::ByName(city.to_string())];
        if let Some(known) = self.reference.find_city(city) {
            queries.push(LocationQuery::ByCoordinates {
                latitude: known.latitude,
                longitude: known.longitude,
                radius_m: self.search_radius_m,
            });
        }
        queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::UNAVAILABLE;
    use crate::error::{AppError, Result};
    use crate::models::{LocationReading, Measurement, Source};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // --- Scripted provider ---
    // Replays one canned outcome per call and records the queries it saw.
    struct ScriptedProvider {
        configured: bool,
        outcomes: Mutex<VecDeque<Result<Vec<LocationReading>>>>,
        seen: Mutex<Vec<LocationQuery>>,
    }

    impl ScriptedProvider {
        fn new(outcomes: Vec<Result<Vec<LocationReading>>>) -> Self {
            Self {
                configured: true,
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(vec![])
            }
        }
    }

    impl AirQualityProvider for ScriptedProvider {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn fetch_latest(&self, query: &LocationQuery) -> Result<Vec<LocationReading>> {
            self.seen.lock().unwrap().push(query.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Provider("no scripted outcome".to_string())))
        }
    }

    fn service(provider: ScriptedProvider) -> AqiService<ScriptedProvider> {
        AqiService::new(provider, Arc::new(ReferenceData::bundled().unwrap()))
    }

    fn delhi(measurements: Vec<Measurement>) -> LocationReading {
        LocationReading {
            city: Some("Delhi".to_string()),
            country: Some("IN".to_string()),
            coordinates: None,
            measurements,
        }
    }

    fn transport_error() -> AppError {
        AppError::Provider("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_live_pm25_for_delhi() {
        let svc = service(ScriptedProvider::new(vec![Ok(vec![delhi(vec![
            Measurement::new("pm25", 40.0, "µg/m³"),
        ])])]));

        let insight = svc.current("Delhi").await;
        assert_eq!(insight.source, Source::Live);
        assert_eq!(insight.aqi, Some(112));
        assert_eq!(insight.dominant_pollutant.as_deref(), Some("pm25"));
        assert_eq!(insight.category, "Unhealthy");
        assert_eq!(insight.trend.len(), 24);
    }

    #[tokio::test]
    async fn test_transport_failure_for_unknown_city_falls_back() {
        let provider = ScriptedProvider::new(vec![Err(transport_error())]);
        let svc = service(provider);

        let insight = svc.current("Unknownville").await;
        assert_eq!(insight.source, Source::Fallback);
        assert_eq!(insight.category, UNAVAILABLE);
        assert!(insight.aqi.is_none());
        assert_eq!(insight.advice, GENERIC_FALLBACK_MESSAGE);
        // Unknown city: no coordinate query to try.
        assert_eq!(svc.provider.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_coordinate_query_after_name_query_fails() {
        let svc = service(ScriptedProvider::new(vec![
            Err(transport_error()),
            Ok(vec![delhi(vec![Measurement::new("pm10", 100.0, "µg/m³")])]),
        ]));

        let insight = svc.current("delhi").await;
        assert_eq!(insight.source, Source::Live);
        assert_eq!(insight.aqi, Some(74));

        let seen = svc.provider.seen.lock().unwrap();
        assert_eq!(seen[0], LocationQuery::ByName("delhi".to_string()));
        assert!(matches!(
            seen[1],
            LocationQuery::ByCoordinates { radius_m: 50_000, .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_results_move_to_next_query() {
        let svc = service(ScriptedProvider::new(vec![
            Ok(vec![]),
            Ok(vec![delhi(vec![Measurement::new("", 1.0, "ppm")])]),
        ]));

        let insight = svc.current("Delhi").await;
        assert_eq!(insight.source, Source::Fallback);
        // Delhi has a stored fallback record with its own message.
        assert_ne!(insight.advice, GENERIC_FALLBACK_MESSAGE);
        assert_eq!(svc.provider.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let svc = service(ScriptedProvider::unconfigured());
        let insight = svc.current("Delhi").await;
        assert_eq!(insight.source, Source::Fallback);
        assert_eq!(insight.advice, MISSING_KEY_REASON);
        assert!(svc.provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_city_falls_back_without_querying() {
        let svc = service(ScriptedProvider::new(vec![]));
        for city in ["", "   ", "\t"] {
            let insight = svc.current(city).await;
            assert_eq!(insight.source, Source::Fallback);
            assert_eq!(insight.category, UNAVAILABLE);
            assert!(insight.aqi.is_none());
            assert_eq!(insight.country, "Unknown");
            assert_eq!(insight.advice, GENERIC_FALLBACK_MESSAGE);
        }
        assert!(svc.provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_city_without_key_reports_missing_key() {
        let svc = service(ScriptedProvider::unconfigured());
        let insight = svc.current(" ").await;
        assert_eq!(insight.source, Source::Fallback);
        assert_eq!(insight.advice, MISSING_KEY_REASON);
    }

    #[tokio::test]
    async fn test_custom_search_radius() {
        let svc = service(ScriptedProvider::new(vec![Ok(vec![]), Ok(vec![])]))
            .with_search_radius(10_000);
        svc.current("Berlin").await;
        let seen = svc.provider.seen.lock().unwrap();
        assert!(matches!(
            seen[1],
            LocationQuery::ByCoordinates { radius_m: 10_000, .. }
        ));
    }
}
