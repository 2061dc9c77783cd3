//! Runtime configuration read from the environment (and a `.env` file, if present).

use crate::api::{ApiMode, BASE_URL};
use crate::error::{AppError, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 50_000;

/// Settings for the OpenAQ client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub mode: ApiMode,
    pub timeout: Duration,
    /// Radius of the coordinate fallback query.
    pub search_radius_m: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            mode: ApiMode::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bind_addr: SocketAddr,
    /// Directory with `cities.json` and `fallback_data.json`; bundled data when unset.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_key = var("OPENAQ_API_KEY")?.or(var("OPENAQ_KEY")?);
        let provider = ProviderConfig {
            api_key,
            base_url: var("OPENAQ_BASE_URL")?.unwrap_or_else(|| BASE_URL.to_string()),
            mode: parse_var("OPENAQ_API_MODE")?.unwrap_or_default(),
            timeout: Duration::from_secs(
                parse_var("OPENAQ_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            search_radius_m: parse_var("OPENAQ_SEARCH_RADIUS_M")?
                .unwrap_or(DEFAULT_SEARCH_RADIUS_M),
        };

        let bind_addr = match parse_var("AQI_BIND_ADDR")? {
            Some(addr) => addr,
            None => parse_value("AQI_BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };

        Ok(Self {
            provider,
            bind_addr,
            data_dir: var("AQI_DATA_DIR")?.map(PathBuf::from),
        })
    }
}

/// Reads a variable, treating unset and blank as absent.
fn var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Env(e)),
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(name)?.map(|raw| parse_value(name, &raw)).transpose()
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| AppError::Config(format!("{}='{}': {}", name, raw, e)))
}
