use crate::config::GeminiConfig;
use crate::datasources::{GeminiClient, TextGenerator};
use crate::error::Result;
use crate::models::{City, EventForecast, FusedForecast};
use std::sync::Arc;

pub const CURRENT_FALLBACK: &str =
    "AI summary unavailable. Light showers expected this afternoon.";
pub const EVENT_FALLBACK: &str =
    "AI summary unavailable. Plan for a mix of sun and clouds for your event.";

/// Which forecast a request, outcome or summary is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastKind {
    Current,
    Event,
}

impl ForecastKind {
    pub fn fallback(&self) -> &'static str {
        match self {
            ForecastKind::Current => CURRENT_FALLBACK,
            ForecastKind::Event => EVENT_FALLBACK,
        }
    }
}

/// Produces natural-language summaries of forecasts.
///
/// Never fails: without a text generator, or when generation fails or comes
/// back empty, the fixed fallback for the forecast kind is returned.
pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Summarizer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Summarizer backed by Gemini when a credential is configured
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        if !config.has_credential() {
            tracing::info!("Gemini API key not configured - summaries will use fallback text");
            return Ok(Self::new(None));
        }

        let client = GeminiClient::new(config.clone())?;
        tracing::info!("Gemini summaries enabled with model {}", client.model());
        Ok(Self::new(Some(Arc::new(client))))
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn summarize_current(&self, city: &City, forecast: &FusedForecast) -> String {
        let prompt = current_prompt(city, forecast);
        self.summarize(ForecastKind::Current, prompt).await
    }

    pub async fn summarize_event(&self, forecast: &EventForecast) -> String {
        let prompt = event_prompt(forecast);
        self.summarize(ForecastKind::Event, prompt).await
    }

    async fn summarize(&self, kind: ForecastKind, prompt: Result<String>) -> String {
        let Some(generator) = self.generator.as_ref() else {
            return kind.fallback().to_string();
        };

        let prompt = match prompt {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Failed to build summary prompt: {}", e);
                return kind.fallback().to_string();
            }
        };

        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("Summary generation returned no text");
                kind.fallback().to_string()
            }
            Err(e) => {
                tracing::warn!("Error generating summary: {}", e);
                kind.fallback().to_string()
            }
        }
    }
}

pub fn current_prompt(city: &City, forecast: &FusedForecast) -> Result<String> {
    let data = serde_json::to_string(forecast)?;
    Ok(format!(
        "Generate a short, human-readable weather summary for {}. Data: {}. \
         Mention key events like rain, high wind, or significant temperature changes.",
        city.name, data
    ))
}

pub fn event_prompt(forecast: &EventForecast) -> Result<String> {
    let data = serde_json::to_string(forecast)?;
    Ok(format!(
        "Generate a short, human-readable weather forecast for an event in {} on {}. \
         Data: {}. Provide actionable advice.",
        forecast.city.name,
        forecast.date_label(),
        data
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::{catalog, mock_event, mock_weather};
    use crate::error::TerraCastError;
    use async_trait::async_trait;
    use chrono::{Local, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records prompts and replies with a canned result
    struct ScriptedGenerator {
        reply: std::result::Result<String, String>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedGenerator {
        fn replying(reply: std::result::Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply
                .clone()
                .map_err(TerraCastError::DataSourceUnavailable)
        }
    }

    fn mumbai_forecast() -> (City, FusedForecast) {
        let city = catalog::find("Mumbai").unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let forecast = mock_weather::generate_forecast(&city, Local::now(), &mut rng);
        (city, forecast)
    }

    fn delhi_event() -> EventForecast {
        let city = catalog::find("Delhi").unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let date = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        mock_event::generate_event_forecast(&city, date, &mut rng)
    }

    #[tokio::test]
    async fn no_credential_returns_fallback() {
        let summarizer = Summarizer::from_config(&GeminiConfig::default()).unwrap();
        assert!(!summarizer.is_enabled());

        let (city, forecast) = mumbai_forecast();
        assert_eq!(
            summarizer.summarize_current(&city, &forecast).await,
            CURRENT_FALLBACK
        );
        assert_eq!(summarizer.summarize_event(&delhi_event()).await, EVENT_FALLBACK);
    }

    #[tokio::test]
    async fn generator_failure_degrades_to_fallback() {
        let generator = ScriptedGenerator::replying(Err("quota exceeded"));
        let summarizer = Summarizer::new(Some(generator.clone()));

        let (city, forecast) = mumbai_forecast();
        let summary = summarizer.summarize_current(&city, &forecast).await;
        assert_eq!(summary, CURRENT_FALLBACK);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_reply_degrades_to_fallback() {
        let generator = ScriptedGenerator::replying(Ok("  \n"));
        let summarizer = Summarizer::new(Some(generator));
        assert_eq!(summarizer.summarize_event(&delhi_event()).await, EVENT_FALLBACK);
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let generator = ScriptedGenerator::replying(Ok(" Hot afternoon, storms late. "));
        let summarizer = Summarizer::new(Some(generator.clone()));

        let (city, forecast) = mumbai_forecast();
        let summary = summarizer.summarize_current(&city, &forecast).await;
        assert_eq!(summary, "Hot afternoon, storms late.");

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with("Generate a short, human-readable weather summary for Mumbai."));
        assert!(prompt.contains("\"hourly\""));
    }

    #[test]
    fn event_prompt_mentions_city_and_date() {
        let prompt = event_prompt(&delhi_event()).unwrap();
        assert!(prompt.contains("for an event in Delhi on Sun Oct 25 2026"));
        assert!(prompt.contains("\"temperature_anomaly\""));
        assert!(prompt.ends_with("Provide actionable advice."));
    }
}
