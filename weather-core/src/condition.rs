use serde::{Deserialize, Serialize};

/// Background selector derived from the provider's weather "main" category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKey {
    #[default]
    Clear,
    Rain,
    Snow,
    Clouds,
}

/// Provider category (lowercased) to background key. Anything not listed
/// falls back to `BackgroundKey::Clear`.
const CONDITION_TABLE: &[(&str, BackgroundKey)] = &[
    ("clear", BackgroundKey::Clear),
    ("rain", BackgroundKey::Rain),
    ("snow", BackgroundKey::Snow),
    ("clouds", BackgroundKey::Clouds),
];

impl BackgroundKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundKey::Clear => "clear",
            BackgroundKey::Rain => "rain",
            BackgroundKey::Snow => "snow",
            BackgroundKey::Clouds => "clouds",
        }
    }

    pub const fn all() -> &'static [BackgroundKey] {
        &[
            BackgroundKey::Clear,
            BackgroundKey::Rain,
            BackgroundKey::Snow,
            BackgroundKey::Clouds,
        ]
    }

    /// Resolve a provider condition such as `"Rain"` to its background key.
    pub fn from_condition(condition_main: Option<&str>) -> Self {
        let Some(raw) = condition_main else {
            return Self::default();
        };

        let needle = raw.trim();
        CONDITION_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(needle))
            .map(|(_, key)| *key)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for BackgroundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conditions_map_case_insensitively() {
        let cases = [
            ("Clear", BackgroundKey::Clear),
            ("Rain", BackgroundKey::Rain),
            ("Snow", BackgroundKey::Snow),
            ("Clouds", BackgroundKey::Clouds),
            ("RAIN", BackgroundKey::Rain),
            ("snow", BackgroundKey::Snow),
            ("cLoUdS", BackgroundKey::Clouds),
            (" Rain ", BackgroundKey::Rain),
        ];

        for (input, expected) in cases {
            assert_eq!(BackgroundKey::from_condition(Some(input)), expected, "{input}");
        }
    }

    #[test]
    fn unknown_or_absent_conditions_fall_back_to_clear() {
        for input in ["Fog", "", "Thunderstorm", "Drizzle", "Mist", "rainy"] {
            assert_eq!(BackgroundKey::from_condition(Some(input)), BackgroundKey::Clear);
        }
        assert_eq!(BackgroundKey::from_condition(None), BackgroundKey::Clear);
    }

    #[test]
    fn every_key_is_reachable_from_its_own_name() {
        for key in BackgroundKey::all() {
            assert_eq!(BackgroundKey::from_condition(Some(key.as_str())), *key);
        }
    }

    #[test]
    fn serializes_as_lowercase_key() {
        let json = serde_json::to_string(&BackgroundKey::Clouds).unwrap();
        assert_eq!(json, "\"clouds\"");
        assert_eq!(BackgroundKey::Snow.to_string(), "snow");
    }
}
