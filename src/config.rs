//! Run configuration.
//!
//! Everything the collector needs is carried explicitly in [`Config`]; the
//! environment is only consulted by [`Config::from_env`].

use std::path::PathBuf;

use tracing::{info, warn};

use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::country::Country;
use crate::date::{DateRange, Timestamp};
use crate::{Error, Result};

pub const API_KEY_VAR: &str = "CALENDARIFIC_API_KEY";
pub const BASE_URL_VAR: &str = "CALENDARIFIC_BASE_URL";
pub const OUTPUT_DIR_VAR: &str = "HOLIDAYS_OUTPUT_DIR";

pub const DEFAULT_COUNTRIES: &[Country] = &[Country::UA, Country::US, Country::GB];
pub const DEFAULT_OUTPUT_DIR: &str = "expected_result";

#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub countries: Vec<Country>,
    pub range: DateRange,
    pub output_dir: PathBuf,
}

impl Config {
    /// The fixed job: `ua`, `us`, `gb` over 1992-01-01 to 1992-12-31.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Config {
            client: ClientConfig::new(api_key),
            countries: DEFAULT_COUNTRIES.to_vec(),
            range: default_range()?,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        })
    }

    /// Loads `.env` if present, then reads the API key and optional overrides.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(error = %err, "could not load .env"),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey(API_KEY_VAR))?;

        let mut config = Config::new(api_key)?;
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.is_empty()) {
            config.client = config.client.base_url(base_url);
        }
        if let Some(dir) = lookup(OUTPUT_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn is_default_endpoint(&self) -> bool {
        self.client.base_url == DEFAULT_BASE_URL
    }
}

fn default_range() -> Result<DateRange> {
    DateRange::new(Timestamp::from_ymd(1992, 1, 1)?, Timestamp::from_ymd(1992, 12, 31)?)
}
