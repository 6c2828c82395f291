use crate::config::Config;
use crate::datasources::{catalog, GeminiClient, MockWeatherProvider, WeatherProvider};
use crate::error::{Result, TerraCastError};
use crate::logic::Summarizer;
use crate::models::{City, EventForecast, FusedForecast};
use chrono::{Local, NaiveDate, TimeDelta};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    city: &'a City,
    forecast: &'a T,
    summary: &'a str,
}

pub fn init() -> Result<()> {
    let (_, path) = Config::setup_interactive()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

pub async fn check(config: &Config, data_dir: Option<&PathBuf>) -> Result<()> {
    println!("Configuration OK");
    println!("  Log file:   {}", Config::log_path(data_dir)?.display());
    println!(
        "  Mock delay: {}-{} ms{}",
        config.mock.min_delay_ms,
        config.mock.max_delay_ms,
        config
            .mock
            .seed
            .map(|s| format!(" (seed {})", s))
            .unwrap_or_default()
    );

    if !config.gemini.has_credential() {
        println!("  Gemini:     no API key, summaries use fallback text");
        return Ok(());
    }

    let client = GeminiClient::new(config.gemini.clone())?;
    match client.test_connection().await {
        Ok(true) => println!("  Gemini:     OK ({})", client.model()),
        Ok(false) => println!("  Gemini:     key rejected or unknown model ({})", client.model()),
        Err(e) => println!("  Gemini:     OFFLINE ({})", e),
    }
    Ok(())
}

pub fn search(query: &str) -> Result<()> {
    let matches = catalog::search(query.trim());
    if matches.is_empty() {
        println!("No cities match \"{}\"", query);
        return Ok(());
    }

    for city in matches {
        println!(
            "{:<14} {:<16} {:>8.4}, {:>8.4}",
            city.name, city.region, city.latitude, city.longitude
        );
    }
    Ok(())
}

pub async fn forecast(config: &Config, city: &str, json: bool) -> Result<()> {
    let city = lookup(city)?;
    let provider = MockWeatherProvider::new(config.mock.clone());
    let summarizer = Summarizer::from_config(&config.gemini)?;

    let forecast = provider.fetch_weather(&city).await?;
    let summary = summarizer.summarize_current(&city, &forecast).await;

    if json {
        print_json(&city, &forecast, &summary)
    } else {
        print!("{}", render_forecast(&city, &forecast, &summary));
        Ok(())
    }
}

pub async fn event(config: &Config, city: &str, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let city = lookup(city)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive() + TimeDelta::days(7));
    let provider = MockWeatherProvider::new(config.mock.clone());
    let summarizer = Summarizer::from_config(&config.gemini)?;

    let forecast = provider.fetch_event_forecast(&city, date).await?;
    let summary = summarizer.summarize_event(&forecast).await;

    if json {
        print_json(&city, &forecast, &summary)
    } else {
        print!("{}", render_event(&forecast, &summary));
        Ok(())
    }
}

fn lookup(name: &str) -> Result<City> {
    catalog::find(name).ok_or_else(|| {
        let hint = catalog::search(name.trim())
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        if hint.is_empty() {
            TerraCastError::NotFound(format!("no city named \"{}\"", name))
        } else {
            TerraCastError::NotFound(format!("no city named \"{}\" (did you mean {}?)", name, hint))
        }
    })
}

fn print_json<T: Serialize>(city: &City, forecast: &T, summary: &str) -> Result<()> {
    let report = Report {
        city,
        forecast,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn render_forecast(city: &City, f: &FusedForecast, summary: &str) -> String {
    let c = &f.current;
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({})  updated {}\n",
        city.display_name(),
        city.country,
        f.last_updated.format("%H:%M")
    ));
    out.push_str(&format!(
        "{} {}°C {}   confidence {}%\n",
        c.condition.category().symbol(),
        c.temperature,
        c.condition,
        f.confidence
    ));
    let sources: Vec<String> = f
        .raw_readings
        .iter()
        .map(|r| format!("{} {}°C", r.source.short_name(), r.temperature))
        .collect();
    out.push_str(&format!("Sources: {}\n\n", sources.join(" | ")));
    out.push_str(&format!("{}\n\n", summary));

    out.push_str(&format!(
        "Wind {} km/h {} (gusts {})  AQI {} (PM2.5 {})  Humidity {}%\n",
        c.wind.speed_kmh,
        c.wind.direction.as_str(),
        c.wind.gusts_kmh,
        c.air_quality.aqi,
        c.air_quality.pm25,
        c.humidity
    ));
    out.push_str(&format!(
        "UV {}  Precip {} mm  Visibility {} km  Sunrise {}  Sunset {}\n\n",
        c.uv_index, c.precipitation_mm, c.visibility_km, c.sunrise, c.sunset
    ));

    for h in f.next_hours(12) {
        out.push_str(&format!(
            "{}  {:>3}°C  {:>3}%  {}\n",
            h.time, h.temperature, h.precip_chance, h.condition
        ));
    }
    out.push('\n');
    for d in &f.daily {
        out.push_str(&format!(
            "{}  {:>3}° / {:>3}°  {}\n",
            d.short_weekday(),
            d.max_temp,
            d.min_temp,
            d.condition
        ));
    }
    out
}

fn render_event(f: &EventForecast, summary: &str) -> String {
    format!(
        "Event forecast for {}\n{}\n{} {}°C {}\n\n{}\n\n\
         Confidence {}%  Precip {}%  Wind {} km/h  Humidity {}%  UV {}\n\
         Anomaly {} ({})  Sunrise {}  Sunset {}\n",
        f.city.display_name(),
        f.date_label(),
        f.condition.category().symbol(),
        f.avg_temp,
        f.condition,
        summary,
        f.confidence,
        f.precip_chance,
        f.wind_speed_kmh,
        f.humidity,
        f.uv_index,
        f.temperature_anomaly.signed(),
        f.temperature_anomaly.description.as_str(),
        f.sunrise,
        f.sunset
    )
}
