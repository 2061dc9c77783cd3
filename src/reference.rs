//! Static reference data: the supported city list and the fallback dataset.
//!
//! Loaded once at startup (bundled JSON, or files from a data directory) and shared
//! read-only behind an `Arc` for the life of the process.

use crate::error::{AppError, Result};
use crate::models::{City, FallbackRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_CITIES: &str = include_str!("../data/cities.json");
const BUNDLED_FALLBACK: &str = include_str!("../data/fallback_data.json");

pub const CITIES_FILE: &str = "cities.json";
pub const FALLBACK_FILE: &str = "fallback_data.json";

/// Immutable lookup tables for cities and fallback records.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    cities: Vec<City>,
    fallback: HashMap<String, FallbackRecord>,
}

impl ReferenceData {
    pub fn new(cities: Vec<City>, fallback: HashMap<String, FallbackRecord>) -> Self {
        Self { cities, fallback }
    }

    /// The datasets compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CITIES, BUNDLED_FALLBACK)
    }

    /// Reads `cities.json` and `fallback_data.json` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        info!("Loading reference data from {}", dir.display());
        let cities = fs::read_to_string(dir.join(CITIES_FILE))?;
        let fallback = fs::read_to_string(dir.join(FALLBACK_FILE))?;
        Self::from_json(&cities, &fallback)
    }

    pub fn from_json(cities: &str, fallback: &str) -> Result<Self> {
        let cities: Vec<City> = serde_json::from_str(cities)?;
        let fallback: HashMap<String, FallbackRecord> = serde_json::from_str(fallback)?;
        if cities.is_empty() {
            return Err(AppError::Config("city list is empty".to_string()));
        }
        debug!(
            "Loaded {} cities and {} fallback records",
            cities.len(),
            fallback.len()
        );
        Ok(Self::new(cities, fallback))
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Case-insensitive lookup in the city list.
    pub fn find_city(&self, name: &str) -> Option<&City> {
        let name = name.to_lowercase();
        self.cities.iter().find(|c| c.city.to_lowercase() == name)
    }

    /// Case-insensitive lookup in the fallback dataset.
    pub fn find_fallback(&self, name: &str) -> Option<&FallbackRecord> {
        let name = name.to_lowercase();
        self.fallback
            .iter()
            .find(|(key, _)| key.to_lowercase() == name)
            .map(|(_, record)| record)
    }
}
