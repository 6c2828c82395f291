use super::{City, Condition};
use chrono::NaiveDate;
use serde::Serialize;

/// Long-range forecast for a single city on a single future date
#[derive(Debug, Clone, Serialize)]
pub struct EventForecast {
    pub date: NaiveDate,
    pub city: City,
    /// 0-100
    pub confidence: u8,
    pub avg_temp: i32,
    /// 0-100
    pub precip_chance: u8,
    pub condition: Condition,
    pub wind_speed_kmh: u32,
    /// 0-100
    pub humidity: u8,
    pub uv_index: u8,
    pub sunrise: String,
    pub sunset: String,
    pub temperature_anomaly: TemperatureAnomaly,
}

impl EventForecast {
    /// "Sun Oct 25 2026"
    pub fn date_label(&self) -> String {
        format_event_date(self.date)
    }
}

pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Deviation from the implied historical average for the date, in °C
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureAnomaly {
    pub value: f64,
    pub description: AnomalyLabel,
}

impl TemperatureAnomaly {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            description: AnomalyLabel::for_value(value),
        }
    }

    /// "+1.3°C" / "-0.4°C" / "0.0°C"
    pub fn signed(&self) -> String {
        if self.value > 0.0 {
            format!("+{:.1}°C", self.value)
        } else if self.value == 0.0 {
            // keeps -0.0 from printing a sign
            "0.0°C".to_string()
        } else {
            format!("{:.1}°C", self.value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyLabel {
    #[serde(rename = "Warmer than average")]
    Warmer,
    #[serde(rename = "Cooler than average")]
    Cooler,
}

impl AnomalyLabel {
    /// A zero anomaly counts as cooler
    pub fn for_value(value: f64) -> Self {
        if value > 0.0 {
            AnomalyLabel::Warmer
        } else {
            AnomalyLabel::Cooler
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyLabel::Warmer => "Warmer than average",
            AnomalyLabel::Cooler => "Cooler than average",
        }
    }
}
