mod country;
mod date;
mod holiday;
pub mod query;
pub mod client;
pub mod collector;
pub mod config;
pub mod output;

pub use client::{Client, ClientConfig, HolidaySource};
pub use collector::{filter_holidays_by_date, Collector};
pub use config::Config;
pub use country::Country;
pub use date::{generate_years_range, DateRange, Timestamp};
pub use holiday::Holiday;
pub use query::Query;

pub type Result<T> = std::result::Result<T, Error>;

/// Runs the configured job against the live API.
pub fn collect(config: &Config) -> Result<Vec<std::path::PathBuf>> {
    let client = Client::new(config.client.clone())?;
    Collector::new(client, &config.output_dir).collect(config.countries.iter().copied(), &config.range)
}

/// Error states the holiday collector might encounter.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Range start is later than its end.
    #[error("Start {start} cannot be later than end {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },
    /// Text is not a recognised ISO-8601 date/time.
    #[error("Not a date/time value: {0:?}")]
    InvalidDate(String),
    /// Code is not a known ISO 3166-1 alpha-2 country.
    #[error("Unknown country code: {0:?}")]
    UnknownCountry(String),
    /// Holiday record has no `date.iso` field.
    #[error("Holiday {0:?} has no date.iso field")]
    MissingDate(String),
    /// Provider answered 200 with a body of unexpected shape.
    #[error("Unexpected holidays payload for {0}")]
    UnexpectedPayload(String),
    /// API key was not configured.
    #[error("Missing API key, set {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
