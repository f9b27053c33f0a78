//! Runtime settings read from the environment (and `.env`).

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const BASE_URL_VAR: &str = "OCEAN_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "OCEAN_API_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "OCEAN_DASH_LOG";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LOG_FILE: &str = "ocean_dash.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OCEAN_API_BASE_URL={value} is not a usable base address: {reason}")]
    BaseUrl { value: String, reason: String },

    #[error("OCEAN_API_TIMEOUT_SECS={value} is not a whole number of seconds")]
    Timeout { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    /// `None` leaves requests without a deadline.
    pub timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if there is one, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset and blank
    /// variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let base_url = var(BASE_URL_VAR).map_or(defaults.base_url, |value| value.trim().to_string());
        validate_base_url(&base_url)?;

        let timeout = match var(TIMEOUT_VAR) {
            None => defaults.timeout,
            Some(value) => parse_timeout(&value)?,
        };

        let log_file = var(LOG_FILE_VAR).map_or(defaults.log_file, PathBuf::from);

        Ok(Self {
            base_url,
            timeout,
            log_file,
        })
    }
}

fn validate_base_url(value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::BaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::BaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }

    Ok(())
}

// Zero disables the deadline
fn parse_timeout(value: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = value.trim().parse().map_err(|_| ConfigError::Timeout {
        value: value.to_string(),
    })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
