use serde::{Deserialize, Serialize};

/// Weather condition labels produced by the forecast generators.
///
/// The set is closed so rendering can match on it instead of inspecting
/// free text. Serialized as the human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    #[serde(rename = "Light Rain")]
    LightRain,
    Thunderstorm,
    Haze,
    #[serde(rename = "Clear Skies")]
    ClearSkies,
    #[serde(rename = "Chance of Showers")]
    ChanceOfShowers,
    Overcast,
    Windy,
}

/// Conditions the current/hourly/daily generator draws from
pub const CURRENT_CONDITIONS: [Condition; 6] = [
    Condition::Sunny,
    Condition::PartlyCloudy,
    Condition::Cloudy,
    Condition::LightRain,
    Condition::Thunderstorm,
    Condition::Haze,
];

/// Conditions the long-range event generator draws from
pub const EVENT_CONDITIONS: [Condition; 5] = [
    Condition::Sunny,
    Condition::ClearSkies,
    Condition::ChanceOfShowers,
    Condition::Overcast,
    Condition::Windy,
];

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::LightRain => "Light Rain",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Haze => "Haze",
            Condition::ClearSkies => "Clear Skies",
            Condition::ChanceOfShowers => "Chance of Showers",
            Condition::Overcast => "Overcast",
            Condition::Windy => "Windy",
        }
    }

    pub fn category(&self) -> ConditionCategory {
        match self {
            Condition::Sunny | Condition::ClearSkies => ConditionCategory::Clear,
            Condition::PartlyCloudy => ConditionCategory::PartlyCloudy,
            Condition::Cloudy | Condition::Overcast => ConditionCategory::Cloudy,
            Condition::LightRain | Condition::ChanceOfShowers => ConditionCategory::Rain,
            Condition::Thunderstorm => ConditionCategory::Thunderstorm,
            Condition::Haze => ConditionCategory::Haze,
            Condition::Windy => ConditionCategory::Windy,
        }
    }

    /// Whether precipitation chances should be biased upward
    pub fn is_rain(&self) -> bool {
        self.category() == ConditionCategory::Rain
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering buckets for conditions: icon, color, map tint and backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunderstorm,
    Haze,
    Windy,
}

impl ConditionCategory {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "☀",
            ConditionCategory::PartlyCloudy => "⛅",
            ConditionCategory::Cloudy => "☁",
            ConditionCategory::Rain => "🌧",
            ConditionCategory::Thunderstorm => "⛈",
            ConditionCategory::Haze => "🌫",
            ConditionCategory::Windy => "🌬",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            ConditionCategory::Clear => Color::Yellow,
            ConditionCategory::PartlyCloudy => Color::Gray,
            ConditionCategory::Cloudy => Color::DarkGray,
            ConditionCategory::Rain => Color::LightBlue,
            ConditionCategory::Thunderstorm => Color::Yellow,
            ConditionCategory::Haze => Color::DarkGray,
            ConditionCategory::Windy => Color::Cyan,
        }
    }
}
