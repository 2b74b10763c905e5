use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Current conditions for one location, as last reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub condition_summary: String,
    /// Provider category such as "Clear" or "Rain"; drives the background.
    pub condition_main: Option<String>,
    pub sunrise_epoch_sec: i64,
    pub sunset_epoch_sec: i64,
}

impl WeatherReport {
    /// The surfaced fields as `(label, value)` pairs, in display order.
    pub fn display_fields(&self) -> [(&'static str, String); 7] {
        [
            ("Location", self.location_name.clone()),
            ("Temperature", format!("{}°C", self.temperature_c)),
            ("Feels like", format!("{}°C", self.feels_like_c)),
            ("Humidity", format!("{}%", self.humidity_pct)),
            ("Conditions", self.condition_summary.clone()),
            ("Sunrise", format_epoch(self.sunrise_epoch_sec)),
            ("Sunset", format_epoch(self.sunset_epoch_sec)),
        ]
    }
}

/// One autocomplete candidate returned for a partial city query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub name: String,
    pub country_code: String,
}

impl CityCandidate {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country_code)
    }
}

impl std::fmt::Display for CityCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country_code)
    }
}

fn format_epoch(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%H:%M UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
