use crate::{
    Config,
    error::ClientError,
    model::{CityCandidate, WeatherReport},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two calls the search flow needs from a weather provider.
///
/// Implementations perform a single attempt per call; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Current conditions for a city name (metric units).
    async fn get_weather(&self, city: &str) -> Result<WeatherReport, ClientError>;

    /// Autocomplete candidates for a partial city name, in provider order.
    /// No minimum-length gating happens here.
    async fn get_city_suggestions(&self, query: &str) -> Result<Vec<CityCandidate>, ClientError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    OpenWeatherClient::from_config(config)
}
