use super::summary::{Summarizer, ForecastKind};
use crate::datasources::WeatherProvider;
use crate::error::Result;
use crate::models::{City, EventForecast, FusedForecast};
use chrono::NaiveDate;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Sequence number of a dispatched request. Higher is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastRequest {
    Current(City),
    Event(City, NaiveDate),
}

impl ForecastRequest {
    pub fn city(&self) -> &City {
        match self {
            ForecastRequest::Current(city) | ForecastRequest::Event(city, _) => city,
        }
    }

    pub fn kind(&self) -> ForecastKind {
        match self {
            ForecastRequest::Current(_) => ForecastKind::Current,
            ForecastRequest::Event(..) => ForecastKind::Event,
        }
    }
}

/// Result reported back by a request task, in order: forecast first,
/// then (if the forecast succeeded) its summary.
#[derive(Debug)]
pub enum Outcome {
    WeatherLoaded {
        ticket: Ticket,
        result: Result<FusedForecast>,
    },
    EventLoaded {
        ticket: Ticket,
        result: Result<EventForecast>,
    },
    Summarized {
        ticket: Ticket,
        kind: ForecastKind,
        summary: String,
    },
}

impl Outcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            Outcome::WeatherLoaded { ticket, .. }
            | Outcome::EventLoaded { ticket, .. }
            | Outcome::Summarized { ticket, .. } => *ticket,
        }
    }
}

/// Runs forecast requests as background tasks so the UI loop never awaits a
/// fetch. Outcomes come back over a channel for the loop to drain.
pub struct Dispatcher {
    provider: Arc<dyn WeatherProvider>,
    summarizer: Arc<Summarizer>,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
    latest: Arc<AtomicU64>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn WeatherProvider>, summarizer: Arc<Summarizer>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            summarizer,
            tx,
            rx,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawn a task for `request` and return its ticket
    pub fn dispatch(&self, request: ForecastRequest) -> Ticket {
        let ticket = Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        tracing::debug!("Dispatching request for {} as {}", request.city().name, ticket);

        let provider = Arc::clone(&self.provider);
        let summarizer = Arc::clone(&self.summarizer);
        let tx = self.tx.clone();
        let latest = Arc::clone(&self.latest);

        tokio::spawn(async move {
            match request {
                ForecastRequest::Current(city) => {
                    let result = provider.fetch_weather(&city).await;
                    if let Err(ref e) = result {
                        tracing::warn!("Weather fetch for {} failed: {}", city.name, e);
                    }
                    let forecast = result.as_ref().ok().cloned();
                    if tx.send(Outcome::WeatherLoaded { ticket, result }).is_err() {
                        return;
                    }

                    if let Some(forecast) = forecast {
                        if superseded(&latest, ticket) {
                            return;
                        }
                        let summary = summarizer.summarize_current(&city, &forecast).await;
                        let _ = tx.send(Outcome::Summarized {
                            ticket,
                            kind: ForecastKind::Current,
                            summary,
                        });
                    }
                }
                ForecastRequest::Event(city, date) => {
                    let result = provider.fetch_event_forecast(&city, date).await;
                    if let Err(ref e) = result {
                        tracing::warn!("Event forecast for {} on {} failed: {}", city.name, date, e);
                    }
                    let forecast = result.as_ref().ok().cloned();
                    if tx.send(Outcome::EventLoaded { ticket, result }).is_err() {
                        return;
                    }

                    if let Some(forecast) = forecast {
                        if superseded(&latest, ticket) {
                            return;
                        }
                        let summary = summarizer.summarize_event(&forecast).await;
                        let _ = tx.send(Outcome::Summarized {
                            ticket,
                            kind: ForecastKind::Event,
                            summary,
                        });
                    }
                }
            }
        });

        ticket
    }

    /// Next finished outcome, if one is ready
    pub fn try_next(&mut self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next outcome
    #[cfg(test)]
    pub async fn next(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }
}

// A newer request makes the summary of an older one pointless
fn superseded(latest: &AtomicU64, ticket: Ticket) -> bool {
    let newest = latest.load(Ordering::SeqCst);
    if newest != ticket.0 {
        tracing::debug!("Skipping summary for {}, superseded by #{}", ticket, newest);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;
    use crate::datasources::{catalog, MockWeatherProvider};
    use crate::error::TerraCastError;
    use crate::logic::summary::{CURRENT_FALLBACK, EVENT_FALLBACK};
    use async_trait::async_trait;
    use chrono::{Local, TimeDelta};
    use std::time::Duration;
    use tokio::time::timeout;

    fn instant_mock() -> Arc<dyn WeatherProvider> {
        Arc::new(MockWeatherProvider::new(MockConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            seed: Some(7),
        }))
    }

    fn dispatcher(provider: Arc<dyn WeatherProvider>) -> Dispatcher {
        Dispatcher::new(provider, Arc::new(Summarizer::new(None)))
    }

    async fn recv(dispatcher: &mut Dispatcher) -> Outcome {
        timeout(Duration::from_secs(5), dispatcher.next())
            .await
            .expect("outcome within timeout")
            .expect("channel open")
    }

    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        async fn fetch_weather(&self, city: &City) -> Result<FusedForecast> {
            Err(TerraCastError::DataSourceUnavailable(city.name.to_string()))
        }

        async fn fetch_event_forecast(&self, city: &City, _: NaiveDate) -> Result<EventForecast> {
            Err(TerraCastError::DataSourceUnavailable(city.name.to_string()))
        }
    }

    #[test]
    fn request_accessors() {
        let delhi = catalog::find("Delhi").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        assert_eq!(ForecastRequest::Current(delhi).city().name, "Delhi");
        assert_eq!(ForecastRequest::Event(delhi, date).city().name, "Delhi");
        assert_eq!(ForecastRequest::Current(delhi).kind(), ForecastKind::Current);
        assert_eq!(ForecastRequest::Event(delhi, date).kind(), ForecastKind::Event);
        assert_eq!(Ticket(3).to_string(), "#3");
    }

    #[tokio::test]
    async fn tickets_increase() {
        let d = dispatcher(instant_mock());
        let mumbai = catalog::find("Mumbai").unwrap();
        let first = d.dispatch(ForecastRequest::Current(mumbai));
        let second = d.dispatch(ForecastRequest::Current(mumbai));
        assert!(second > first);
    }

    #[tokio::test]
    async fn weather_then_summary() {
        let mut d = dispatcher(instant_mock());
        let mumbai = catalog::find("Mumbai").unwrap();
        let ticket = d.dispatch(ForecastRequest::Current(mumbai));

        match recv(&mut d).await {
            Outcome::WeatherLoaded { ticket: t, result } => {
                assert_eq!(t, ticket);
                let forecast = result.unwrap();
                assert_eq!(forecast.hourly.len(), 24);
                assert_eq!(forecast.daily.len(), 10);
            }
            other => panic!("expected weather first, got {:?}", other),
        }

        match recv(&mut d).await {
            Outcome::Summarized { ticket: t, kind, summary } => {
                assert_eq!(t, ticket);
                assert_eq!(kind, ForecastKind::Current);
                assert_eq!(summary, CURRENT_FALLBACK);
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn event_then_summary() {
        let mut d = dispatcher(instant_mock());
        let delhi = catalog::find("Delhi").unwrap();
        let date = Local::now().date_naive() + TimeDelta::days(7);
        d.dispatch(ForecastRequest::Event(delhi, date));

        match recv(&mut d).await {
            Outcome::EventLoaded { result, .. } => {
                let forecast = result.unwrap();
                assert_eq!(forecast.date, date);
                assert_eq!(forecast.city.name, "Delhi");
            }
            other => panic!("expected event forecast, got {:?}", other),
        }
        match recv(&mut d).await {
            Outcome::Summarized { kind, summary, .. } => {
                assert_eq!(kind, ForecastKind::Event);
                assert_eq!(summary, EVENT_FALLBACK);
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_fetch_reports_error_without_summary() {
        let mut d = dispatcher(Arc::new(FailingProvider));
        let pune = catalog::find("Pune").unwrap();
        d.dispatch(ForecastRequest::Current(pune));

        match recv(&mut d).await {
            Outcome::WeatherLoaded { result, .. } => assert!(result.is_err()),
            other => panic!("expected weather outcome, got {:?}", other),
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(d.try_next().is_none());
    }
}
