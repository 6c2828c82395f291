use crate::models::City;
use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// Sunrise and sunset for `city` on `date`, as local "06:05 AM" strings.
///
/// Falls back to `fallback` for whichever event the solar model cannot
/// produce (invalid coordinates, polar day/night).
pub fn sun_times(city: &City, date: NaiveDate, fallback: (&str, &str)) -> (String, String) {
    let Some(coordinates) = Coordinates::new(city.latitude, city.longitude) else {
        tracing::debug!(
            "Invalid coordinates for {}: lat={}, lon={}",
            city.name,
            city.latitude,
            city.longitude
        );
        return (fallback.0.to_string(), fallback.1.to_string());
    };

    let solar_day = SolarDay::new(coordinates, date);

    let sunrise = solar_day
        .event_time(SolarEvent::Sunrise)
        .map(|t| format_local(city, t))
        .unwrap_or_else(|| fallback.0.to_string());

    let sunset = solar_day
        .event_time(SolarEvent::Sunset)
        .map(|t| format_local(city, t))
        .unwrap_or_else(|| fallback.1.to_string());

    (sunrise, sunset)
}

fn format_local(city: &City, time: DateTime<Utc>) -> String {
    time.with_timezone(&city.utc_offset())
        .format("%I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::catalog;

    #[test]
    fn mumbai_sun_times_are_plausible() {
        let city = catalog::find("Mumbai").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let (sunrise, sunset) = sun_times(&city, date, ("06:05 AM", "07:15 PM"));

        assert!(sunrise.ends_with("AM"), "sunrise was {}", sunrise);
        assert!(sunset.ends_with("PM"), "sunset was {}", sunset);
        assert!(sunrise.starts_with("06"), "sunrise was {}", sunrise);
        assert!(sunset.starts_with("06"), "sunset was {}", sunset);
    }
}
