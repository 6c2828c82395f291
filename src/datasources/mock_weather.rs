use super::mock_event::generate_event_forecast;
use super::{solar, WeatherProvider};
use crate::config::MockConfig;
use crate::error::{Result, TerraCastError};
use crate::logic::fusion::{clamp_percent, fuse_temperature};
use crate::models::{
    AirQuality, City, CompassPoint, CurrentConditions, DailySample, EventForecast, FusedForecast,
    HourlySample, RawReading, WeatherSource, Wind, CURRENT_CONDITIONS, DAILY_SAMPLES,
    HOURLY_SAMPLES,
};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Timelike};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::f64::consts::PI;
use std::sync::Mutex;
use std::time::Duration;

/// Used when the solar model can't place sunrise/sunset
const SUN_FALLBACK: (&str, &str) = ("06:05 AM", "07:15 PM");

/// Mock provider that synthesizes forecasts after a simulated network delay.
///
/// Randomness comes from a single seedable generator so a fixed
/// `mock.seed` reproduces the same sequence of forecasts.
pub struct MockWeatherProvider {
    config: MockConfig,
    rng: Mutex<StdRng>,
}

impl MockWeatherProvider {
    pub fn new(config: MockConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!("Mock weather provider seeded with {}", seed);
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    async fn simulate_latency(&self) {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        let delay_ms = if max > min {
            self.with_rng(|rng| rng.random_range(min..max))
        } else {
            min
        };

        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn fetch_weather(&self, city: &City) -> Result<FusedForecast> {
        self.simulate_latency().await;
        let forecast = self.with_rng(|rng| generate_forecast(city, Local::now(), rng));
        tracing::debug!(
            "Synthesized forecast for {}: {}°C {}",
            city.name,
            forecast.current.temperature,
            forecast.current.condition
        );
        Ok(forecast)
    }

    async fn fetch_event_forecast(&self, city: &City, date: NaiveDate) -> Result<EventForecast> {
        let today = Local::now().date_naive();
        if date <= today {
            return Err(TerraCastError::InvalidData(format!(
                "Event date {} must be after today ({})",
                date, today
            )));
        }

        self.simulate_latency().await;
        let forecast = self.with_rng(|rng| generate_event_forecast(city, date, rng));
        tracing::debug!("Synthesized event forecast for {} on {}", city.name, date);
        Ok(forecast)
    }
}

/// Northern cities run warmer in the synthetic model
pub(crate) fn latitude_bonus(city: &City) -> f64 {
    if city.latitude > 20.0 {
        5.0
    } else {
        0.0
    }
}

pub(crate) fn pick<T: Copy, R: RngExt + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

/// Synthesize a fused current/hourly/daily forecast for `city` as of `now`.
///
/// Four simulated sources perturb a latitude-biased base temperature; the
/// fused temperature is their rounded mean and anchors the hourly diurnal
/// curve and the daily series.
pub fn generate_forecast<R: RngExt + ?Sized>(
    city: &City,
    now: DateTime<Local>,
    rng: &mut R,
) -> FusedForecast {
    let base_temp = 20.0 + latitude_bonus(city) + rng.random::<f64>() * 10.0;
    let condition = pick(rng, &CURRENT_CONDITIONS);

    let raw_readings: Vec<RawReading> = WeatherSource::ALL
        .iter()
        .map(|&source| {
            let (jitter, reading_condition): (f64, _) = match source {
                WeatherSource::Nasa => (rng.random_range(-0.25..0.25), condition),
                WeatherSource::OpenWeatherMap => (rng.random_range(-1.0..1.0), condition),
                _ => (
                    rng.random_range(-1.0..1.0),
                    pick(rng, &CURRENT_CONDITIONS),
                ),
            };
            RawReading {
                source,
                temperature: (base_temp + jitter).round() as i32,
                condition: reading_condition,
            }
        })
        .collect();

    let fused = fuse_temperature(&raw_readings).unwrap_or(base_temp.round() as i32);

    let start_of_hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let hourly: Vec<HourlySample> = (0..HOURLY_SAMPLES)
        .map(|i| {
            let time = start_of_hour + TimeDelta::hours(i as i64);
            let diurnal = (i as f64 / 12.0 * PI).sin() * 5.0;
            let noise: f64 = rng.random_range(-1.0..1.0);
            let precip: f64 = if condition.is_rain() {
                40.0 + rng.random::<f64>() * 40.0
            } else {
                rng.random::<f64>() * 30.0 - 10.0
            };

            HourlySample {
                time: time.format("%H:%M").to_string(),
                temperature: (fused as f64 - diurnal + noise).round() as i32,
                precip_chance: clamp_percent(precip),
                condition: pick(rng, &CURRENT_CONDITIONS),
            }
        })
        .collect();

    let today = now.date_naive();
    let daily: Vec<DailySample> = (0..DAILY_SAMPLES)
        .map(|i| {
            let date = today + TimeDelta::days(i as i64);
            let day_temp = fused as f64 + rng.random_range(-2.0..2.0);
            DailySample {
                date,
                weekday: date.format("%A").to_string(),
                max_temp: (day_temp + 4.0).round() as i32,
                min_temp: (day_temp - 4.0).round() as i32,
                condition: pick(rng, &CURRENT_CONDITIONS),
            }
        })
        .collect();

    let (sunrise, sunset) = solar::sun_times(city, today, SUN_FALLBACK);

    let current = CurrentConditions {
        temperature: fused,
        condition,
        wind: Wind {
            speed_kmh: rng.random_range(5..=20),
            gusts_kmh: rng.random_range(15..=35),
            direction: pick(rng, &CompassPoint::ALL),
        },
        air_quality: AirQuality {
            aqi: rng.random_range(20..=170),
            pm25: rng.random_range(15..=115),
            pm10: rng.random_range(20..=140),
            no2: rng.random_range(10..=60),
        },
        humidity: rng.random_range(40..=90),
        precipitation_mm: if condition.is_rain() {
            rng.random_range(0..=10)
        } else {
            0
        },
        sunrise,
        sunset,
        uv_index: rng.random_range(3..=11),
        visibility_km: rng.random_range(5..=15),
    };

    FusedForecast {
        last_updated: now,
        confidence: rng.random_range(85..=95),
        raw_readings,
        current,
        hourly,
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::catalog;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 10, 18, 14, 37, 12)
            .single()
            .unwrap()
    }

    fn forecast_with_seed(seed: u64) -> FusedForecast {
        let city = catalog::find("Mumbai").unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        generate_forecast(&city, fixed_now(), &mut rng)
    }

    #[test]
    fn series_lengths() {
        let forecast = forecast_with_seed(1);
        assert_eq!(forecast.hourly.len(), 24);
        assert_eq!(forecast.daily.len(), 10);
        assert_eq!(forecast.raw_readings.len(), 4);
    }

    #[test]
    fn fused_temperature_is_rounded_mean_of_readings() {
        for seed in 0..100 {
            let forecast = forecast_with_seed(seed);
            let sum: i32 = forecast.raw_readings.iter().map(|r| r.temperature).sum();
            let mean = (sum as f64 / 4.0).round() as i32;
            assert_eq!(forecast.current.temperature, mean, "seed {}", seed);
        }
    }

    #[test]
    fn bounded_fields_stay_in_range() {
        for seed in 0..200 {
            let forecast = forecast_with_seed(seed);
            let current = &forecast.current;
            assert!((85..=95).contains(&forecast.confidence));
            assert!((40..=90).contains(&current.humidity));
            assert!((5..=20).contains(&current.wind.speed_kmh));
            assert!((15..=35).contains(&current.wind.gusts_kmh));
            assert!((20..=170).contains(&current.air_quality.aqi));
            assert!((15..=115).contains(&current.air_quality.pm25), "seed {}", seed);
            assert!((20..=140).contains(&current.air_quality.pm10), "seed {}", seed);
            assert!((10..=60).contains(&current.air_quality.no2), "seed {}", seed);
            assert!((3..=11).contains(&current.uv_index));
            assert!((5..=15).contains(&current.visibility_km));
            assert!(current.precipitation_mm <= 10);
            assert!(forecast.hourly.iter().all(|h| h.precip_chance <= 100));
        }
    }

    #[test]
    fn readings_share_current_condition_where_expected() {
        let forecast = forecast_with_seed(3);
        let condition = forecast.current.condition;
        let by_source = |source| {
            forecast
                .raw_readings
                .iter()
                .find(|r| r.source == source)
                .unwrap()
        };
        assert_eq!(by_source(WeatherSource::OpenWeatherMap).condition, condition);
        assert_eq!(by_source(WeatherSource::Nasa).condition, condition);
    }

    #[test]
    fn precipitation_biased_by_rain() {
        for seed in 0..100 {
            let forecast = forecast_with_seed(seed);
            if forecast.current.condition.is_rain() {
                assert!(forecast.hourly.iter().all(|h| h.precip_chance >= 40));
            } else {
                assert_eq!(forecast.current.precipitation_mm, 0);
                assert!(forecast.hourly.iter().all(|h| h.precip_chance <= 20));
            }
        }
    }

    #[test]
    fn hourly_starts_at_current_hour() {
        let forecast = forecast_with_seed(5);
        let labels: Vec<&str> = forecast.hourly.iter().map(|h| h.time.as_str()).collect();
        assert_eq!(labels[0], "14:00");
        assert_eq!(labels[1], "15:00");
        assert_eq!(labels[10], "00:00");
        assert_eq!(labels[23], "13:00");
    }

    #[test]
    fn hourly_follows_diurnal_curve() {
        let forecast = forecast_with_seed(9);
        let fused = forecast.current.temperature;
        // sin(pi/2) trough at i = 6, flat at i = 0 and i = 12
        assert!((fused - 6..=fused - 4).contains(&forecast.hourly[6].temperature));
        assert!((fused - 1..=fused + 1).contains(&forecast.hourly[0].temperature));
        assert!((fused - 1..=fused + 1).contains(&forecast.hourly[12].temperature));
    }

    #[test]
    fn daily_is_chronological_from_today() {
        let forecast = forecast_with_seed(11);
        let today = fixed_now().date_naive();
        for (i, day) in forecast.daily.iter().enumerate() {
            assert_eq!(day.date, today + TimeDelta::days(i as i64));
            assert_eq!(day.max_temp - day.min_temp, 8);
            let fused = forecast.current.temperature;
            assert!((fused - 6..=fused + 6).contains(&day.max_temp));
        }
        assert_eq!(forecast.daily[0].weekday, "Sunday");
        assert_eq!(forecast.daily[1].weekday, "Monday");
    }

    #[test]
    fn northern_cities_run_warmer_base() {
        let delhi = catalog::find("Delhi").unwrap();
        let chennai = catalog::find("Chennai").unwrap();
        assert_eq!(latitude_bonus(&delhi), 5.0);
        assert_eq!(latitude_bonus(&chennai), 0.0);
    }

    #[test]
    fn same_seed_reproduces_forecast() {
        let a = forecast_with_seed(77);
        let b = forecast_with_seed(77);
        assert_eq!(a.current.temperature, b.current.temperature);
        assert_eq!(a.current.condition, b.current.condition);
        let temps_a: Vec<i32> = a.hourly.iter().map(|h| h.temperature).collect();
        let temps_b: Vec<i32> = b.hourly.iter().map(|h| h.temperature).collect();
        assert_eq!(temps_a, temps_b);
    }

    fn instant_provider(seed: u64) -> MockWeatherProvider {
        MockWeatherProvider::new(MockConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            seed: Some(seed),
        })
    }

    #[tokio::test]
    async fn provider_fetches_weather() {
        let provider = instant_provider(1);
        let city = catalog::find("Pune").unwrap();
        let forecast = provider.fetch_weather(&city).await.unwrap();
        assert_eq!(forecast.hourly.len(), 24);
        assert_eq!(forecast.daily.len(), 10);
    }

    #[tokio::test]
    async fn provider_rejects_past_event_dates() {
        let provider = instant_provider(2);
        let city = catalog::find("Delhi").unwrap();
        let today = Local::now().date_naive();

        let err = provider.fetch_event_forecast(&city, today).await;
        assert!(matches!(err, Err(TerraCastError::InvalidData(_))));

        let tomorrow = today + TimeDelta::days(1);
        assert!(provider.fetch_event_forecast(&city, tomorrow).await.is_ok());
    }
}
