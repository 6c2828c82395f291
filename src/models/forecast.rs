use super::Condition;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Number of hourly samples in a fused forecast
pub const HOURLY_SAMPLES: usize = 24;
/// Number of daily samples in a fused forecast
pub const DAILY_SAMPLES: usize = 10;

/// Simulated upstream weather providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeatherSource {
    OpenWeatherMap,
    #[serde(rename = "WeatherAPI.com")]
    WeatherApi,
    #[serde(rename = "Tomorrow.io")]
    TomorrowIo,
    #[serde(rename = "NASA")]
    Nasa,
}

impl WeatherSource {
    pub const ALL: [WeatherSource; 4] = [
        WeatherSource::OpenWeatherMap,
        WeatherSource::WeatherApi,
        WeatherSource::TomorrowIo,
        WeatherSource::Nasa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::OpenWeatherMap => "OpenWeatherMap",
            WeatherSource::WeatherApi => "WeatherAPI.com",
            WeatherSource::TomorrowIo => "Tomorrow.io",
            WeatherSource::Nasa => "NASA",
        }
    }

    /// Label without the domain suffix, for compact display
    pub fn short_name(&self) -> &'static str {
        match self {
            WeatherSource::WeatherApi => "WeatherAPI",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One simulated provider's observation
#[derive(Debug, Clone, Serialize)]
pub struct RawReading {
    pub source: WeatherSource,
    pub temperature: i32,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompassPoint {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthEast => "NE",
            CompassPoint::East => "E",
            CompassPoint::SouthEast => "SE",
            CompassPoint::South => "S",
            CompassPoint::SouthWest => "SW",
            CompassPoint::West => "W",
            CompassPoint::NorthWest => "NW",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Wind {
    pub speed_kmh: u32,
    pub gusts_kmh: u32,
    pub direction: CompassPoint,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirQuality {
    pub aqi: u32,
    pub pm25: u32,
    pub pm10: u32,
    pub no2: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub condition: Condition,
    pub wind: Wind,
    pub air_quality: AirQuality,
    pub humidity: u8,
    pub precipitation_mm: u32,
    pub sunrise: String,
    pub sunset: String,
    pub uv_index: u8,
    pub visibility_km: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlySample {
    /// Local clock label, "14:00"
    pub time: String,
    pub temperature: i32,
    /// 0-100
    pub precip_chance: u8,
    pub condition: Condition,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySample {
    pub date: NaiveDate,
    /// Full weekday name, "Sunday"
    pub weekday: String,
    pub max_temp: i32,
    pub min_temp: i32,
    pub condition: Condition,
}

impl DailySample {
    pub fn short_weekday(&self) -> &str {
        self.weekday.get(..3).unwrap_or(&self.weekday)
    }
}

/// Current, hourly and daily weather fused from several simulated sources
#[derive(Debug, Clone, Serialize)]
pub struct FusedForecast {
    pub last_updated: DateTime<Local>,
    /// 0-100
    pub confidence: u8,
    pub raw_readings: Vec<RawReading>,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlySample>, // chronological from the current hour
    pub daily: Vec<DailySample>,   // chronological from today
}

impl FusedForecast {
    /// First `hours` hourly samples (fewer if the series is shorter)
    pub fn next_hours(&self, hours: usize) -> &[HourlySample] {
        &self.hourly[..hours.min(self.hourly.len())]
    }

    pub fn max_temp_next_days(&self, days: usize) -> Option<i32> {
        self.daily.iter().take(days).map(|d| d.max_temp).max()
    }

    pub fn min_temp_next_days(&self, days: usize) -> Option<i32> {
        self.daily.iter().take(days).map(|d| d.min_temp).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hour(i: usize) -> HourlySample {
        HourlySample {
            time: format!("{:02}:00", i),
            temperature: 20 + i as i32,
            precip_chance: 10,
            condition: Condition::Sunny,
        }
    }

    fn sample_day(weekday: &str, max: i32, min: i32) -> DailySample {
        DailySample {
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            weekday: weekday.to_string(),
            max_temp: max,
            min_temp: min,
            condition: Condition::Cloudy,
        }
    }

    fn sample_forecast() -> FusedForecast {
        FusedForecast {
            last_updated: Local::now(),
            confidence: 90,
            raw_readings: Vec::new(),
            current: CurrentConditions {
                temperature: 25,
                condition: Condition::Sunny,
                wind: Wind {
                    speed_kmh: 10,
                    gusts_kmh: 20,
                    direction: CompassPoint::NorthWest,
                },
                air_quality: AirQuality {
                    aqi: 50,
                    pm25: 20,
                    pm10: 30,
                    no2: 15,
                },
                humidity: 60,
                precipitation_mm: 0,
                sunrise: "06:05 AM".into(),
                sunset: "07:15 PM".into(),
                uv_index: 5,
                visibility_km: 10,
            },
            hourly: (0..5).map(sample_hour).collect(),
            daily: vec![sample_day("Sunday", 30, 22), sample_day("Monday", 33, 19)],
        }
    }

    #[test]
    fn next_hours_is_bounded_by_series() {
        let forecast = sample_forecast();
        assert_eq!(forecast.next_hours(3).len(), 3);
        assert_eq!(forecast.next_hours(12).len(), 5);
    }

    #[test]
    fn daily_extremes() {
        let forecast = sample_forecast();
        assert_eq!(forecast.max_temp_next_days(10), Some(33));
        assert_eq!(forecast.min_temp_next_days(1), Some(22));
    }

    #[test]
    fn short_weekday_abbreviates() {
        assert_eq!(sample_day("Wednesday", 0, 0).short_weekday(), "Wed");
    }

    #[test]
    fn sources_serialize_with_display_names() {
        let json = serde_json::to_string(&WeatherSource::ALL).unwrap();
        assert_eq!(
            json,
            r#"["OpenWeatherMap","WeatherAPI.com","Tomorrow.io","NASA"]"#
        );
        assert_eq!(WeatherSource::WeatherApi.short_name(), "WeatherAPI");
    }
}
