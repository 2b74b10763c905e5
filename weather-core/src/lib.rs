//! Core library for the `weather` city search.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider client (current conditions, city autocomplete)
//! - The search controller that turns user input into interaction state
//! - Shared domain models and the condition-to-background mapping
//!
//! It is used by `weather-cli`, but can also back any other front end.

pub mod condition;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;

pub use condition::BackgroundKey;
pub use config::Config;
pub use controller::{QueryState, SearchController, SearchPhase, SuggestionTicket};
pub use error::ClientError;
pub use model::{CityCandidate, WeatherReport};
pub use provider::{WeatherApi, openweather::OpenWeatherClient};
