//! Provides a client for interacting with the OpenAQ API.
//!
//! This module defines the `OpenAqClient` struct, which fetches the latest
//! measurements for a location in one of two modes:
//! - `Latest`: a single `/latest` query by city name or coordinates.
//! - `Locations`: `/locations` discovery by coordinates, then `/locations/{id}/latest`.

use super::{AirQualityProvider, LocationQuery};
use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use crate::models::{LatestPayload, LatestResponse, LocationReading, LocationsResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

pub const BASE_URL: &str = "https://api.openaq.org/v3";
const USER_AGENT: &str = concat!("aqi-tracker/", env!("CARGO_PKG_VERSION"));
/// `/locations` rejects larger radii.
const MAX_LOCATIONS_RADIUS_M: u32 = 25_000;

/// Which OpenAQ query scheme the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMode {
    #[default]
    Latest,
    Locations,
}

impl FromStr for ApiMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(ApiMode::Latest),
            "locations" => Ok(ApiMode::Locations),
            other => Err(AppError::Config(format!(
                "unknown OpenAQ API mode '{}' (expected 'latest' or 'locations')",
                other
            ))),
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Latest => f.write_str("latest"),
            ApiMode::Locations => f.write_str("locations"),
        }
    }
}

/// An asynchronous client for fetching the latest measurements from OpenAQ.
#[derive(Debug, Clone)]
pub struct OpenAqClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    mode: ApiMode,
}

impl OpenAqClient {
    /// Creates a client against the default OpenAQ base URL in `Latest` mode.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.to_string(),
            mode: ApiMode::default(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Ok(Self::new(config.api_key.clone(), config.timeout)?
            .with_base_url(&config.base_url)
            .with_mode(config.mode))
    }

    /// Points the client at another root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    /// GETs `{base_url}{path}` and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Error requesting {}: {}", url, e);
            AppError::from(e)
        })?;

        // Check HTTP status code and handle potential API errors
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let status = e.status();
                error!(
                    "API request to {} failed with status {}: {}",
                    url,
                    status.unwrap_or_default(),
                    e
                );
                if status == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || status == Some(reqwest::StatusCode::FORBIDDEN)
                {
                    error!("Received 401/403. Check OPENAQ_API_KEY validity and permissions.");
                }
                return Err(AppError::from(e));
            },
        };

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(AppError::Provider(format!("empty response body from {}", url)));
        }
        serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing API response JSON from {}: {}", url, e);
            AppError::from(e)
        })
    }

    async fn fetch_from_latest(&self, query: &LocationQuery) -> Result<Vec<LocationReading>> {
        let mut params: Vec<(&str, String)> = match query {
            LocationQuery::ByName(name) => vec![("city", name.clone())],
            LocationQuery::ByCoordinates {
                latitude,
                longitude,
                radius_m,
            } => vec![
                ("coordinates", format!("{},{}", latitude, longitude)),
                ("radius", radius_m.to_string()),
            ],
        };
        params.push(("limit", "1".to_string()));
        params.push(("sort", "desc".to_string()));

        let payload: LatestPayload = self.get_json("/latest", &params).await?;
        let readings: Vec<LocationReading> = payload
            .into_entries()
            .into_iter()
            .map(LocationReading::from)
            .collect();

        debug!("Received {} locations for {}", readings.len(), query);
        Ok(readings)
    }

    async fn fetch_from_locations(&self, query: &LocationQuery) -> Result<Vec<LocationReading>> {
        let (latitude, longitude, radius_m) = match query {
            LocationQuery::ByName(name) => {
                debug!("Locations mode cannot search by name; skipping '{}'", name);
                return Ok(Vec::new());
            },
            LocationQuery::ByCoordinates {
                latitude,
                longitude,
                radius_m,
            } => (*latitude, *longitude, (*radius_m).min(MAX_LOCATIONS_RADIUS_M)),
        };

        let locations: LocationsResponse = self
            .get_json(
                "/locations",
                &[
                    ("coordinates", format!("{},{}", latitude, longitude)),
                    ("radius", radius_m.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let mut readings = Vec::with_capacity(locations.results.len());
        for location in &locations.results {
            let latest: LatestResponse = self
                .get_json(&format!("/locations/{}/latest", location.id), &[])
                .await?;
            debug!(
                "Location {} returned {} latest values",
                location.id,
                latest.results.len()
            );
            readings.push(location.reading_from(latest.results));
        }
        Ok(readings)
    }
}

impl AirQualityProvider for OpenAqClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_latest(&self, query: &LocationQuery) -> Result<Vec<LocationReading>> {
        info!("Fetching latest measurements for {} ({} mode)", query, self.mode);
        match self.mode {
            ApiMode::Latest => self.fetch_from_latest(query).await,
            ApiMode::Locations => self.fetch_from_locations(query).await,
        }
    }
}
