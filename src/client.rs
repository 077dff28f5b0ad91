//! Blocking client for the Calendarific `/holidays` endpoint.

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::country::Country;
use crate::holiday::Holiday;
use crate::query::Query;
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://calendarific.com/api/v2";
const HOLIDAYS_PATH: &str = "/holidays";

/// Anything able to answer a single-country, single-year holiday query.
pub trait HolidaySource {
    /// Holidays for `query`, in provider order.
    ///
    /// Implementations may degrade provider-side failures to an empty list;
    /// only faults that should abort the whole run are returned as errors.
    fn holidays(&self, query: &Query) -> Result<Vec<Holiday>>;
}

impl<S: HolidaySource + ?Sized> HolidaySource for &S {
    #[inline]
    fn holidays(&self, query: &Query) -> Result<Vec<Holiday>> {
        (**self).holidays(query)
    }
}

/// Connection settings for [`Client`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct Client {
    http: HttpClient,
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Client { http, config })
    }

    pub fn holidays_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), HOLIDAYS_PATH)
    }

    /// Fetches one country's holidays for one calendar year.
    ///
    /// A non-200 status or an empty `response` array is logged and yields an
    /// empty list. Transport failures and undecodable bodies are errors.
    pub fn request_holidays_per_year(&self, country: Country, year: i32) -> Result<Vec<Holiday>> {
        let query = Query::new(country, year);
        let url = self.holidays_url();
        debug!(%url, %query, "requesting holidays");

        let response = self
            .http
            .get(&url)
            .query(&query.params(&self.config.api_key))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(%query, %status, bytes = body.len(), "received holidays response");

        if status != StatusCode::OK {
            error!(%query, %status, %body, "holiday request failed, treating as no holidays");
            return Ok(Vec::new());
        }

        let mut envelope: Value = serde_json::from_str(&body)?;
        match envelope.get_mut("response").map(Value::take) {
            Some(Value::Array(items)) if items.is_empty() => {
                error!(%query, %status, %body, "holiday response is empty, treating as no holidays");
                Ok(Vec::new())
            }
            Some(Value::Object(mut payload)) => match payload.remove("holidays") {
                Some(holidays) => Ok(serde_json::from_value(holidays)?),
                None => Ok(Vec::new()),
            },
            _ => Err(Error::UnexpectedPayload(query.to_string())),
        }
    }
}

impl HolidaySource for Client {
    #[inline]
    fn holidays(&self, query: &Query) -> Result<Vec<Holiday>> {
        self.request_holidays_per_year(query.country(), query.year())
    }
}
