pub mod catalog;
pub mod gemini;
pub mod mock_event;
pub mod mock_weather;
pub mod solar;

pub use gemini::{GeminiClient, TextGenerator};
pub use mock_weather::MockWeatherProvider;

use crate::error::Result;
use crate::models::{City, EventForecast, FusedForecast};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of forecasts for the dashboard and the event planner
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather(&self, city: &City) -> Result<FusedForecast>;

    /// Long-range forecast for `date`, which must be after today
    async fn fetch_event_forecast(&self, city: &City, date: NaiveDate) -> Result<EventForecast>;
}
