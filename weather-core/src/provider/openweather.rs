use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    Config,
    config::DEFAULT_BASE_URL,
    error::ClientError,
    model::{CityCandidate, WeatherReport},
};

use super::WeatherApi;

const WEATHER_ENDPOINT: &str = "weather";
const FIND_ENDPOINT: &str = "find";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_http(api_key, Client::new())
    }

    pub fn with_http(api_key: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the client at another provider root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_owned();
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_http(api_key, http).with_base_url(config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, ?params, "requesting provider");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| network_error(endpoint, "sending request", source))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| network_error(endpoint, "reading body", source))?;

        if !status.is_success() {
            warn!(endpoint, %status, "provider returned non-success status");
            return Err(ClientError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            warn!(endpoint, error = %source, "provider body did not match expected shape");
            ClientError::MalformedBody { endpoint, source }
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwFindSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwFindEntry {
    name: String,
    sys: OwFindSys,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    list: Vec<OwFindEntry>,
}

impl From<OwCurrentResponse> for WeatherReport {
    fn from(parsed: OwCurrentResponse) -> Self {
        let first = parsed.weather.into_iter().next();

        let (condition_summary, condition_main) = match first {
            Some(w) => (w.description, Some(w.main)),
            None => ("Unknown".to_string(), None),
        };

        WeatherReport {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            condition_summary,
            condition_main,
            sunrise_epoch_sec: parsed.sys.sunrise,
            sunset_epoch_sec: parsed.sys.sunset,
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn get_weather(&self, city: &str) -> Result<WeatherReport, ClientError> {
        let parsed: OwCurrentResponse = self
            .fetch(WEATHER_ENDPOINT, &[("q", city), ("units", "metric")])
            .await?;

        Ok(parsed.into())
    }

    async fn get_city_suggestions(&self, query: &str) -> Result<Vec<CityCandidate>, ClientError> {
        let parsed: OwFindResponse = self
            .fetch(FIND_ENDPOINT, &[("q", query), ("type", "like")])
            .await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| CityCandidate {
                name: entry.name,
                country_code: entry.sys.country,
            })
            .collect())
    }
}

/// The request URL carries the API key, so it is dropped from the error.
fn network_error(endpoint: &'static str, stage: &'static str, source: reqwest::Error) -> ClientError {
    let source = source.without_url();
    warn!(endpoint, stage, error = %source, "provider exchange failed");
    ClientError::Network { endpoint, source }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
