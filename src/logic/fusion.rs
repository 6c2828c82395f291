use crate::models::RawReading;

/// Fuse source readings into one temperature: the arithmetic mean, rounded
/// half away from zero. `None` when there is nothing to fuse.
pub fn fuse_temperature(readings: &[RawReading]) -> Option<i32> {
    if readings.is_empty() {
        return None;
    }

    let sum: i64 = readings.iter().map(|r| r.temperature as i64).sum();
    Some((sum as f64 / readings.len() as f64).round() as i32)
}

/// Spread between the warmest and coolest source, in °C
pub fn source_spread(readings: &[RawReading]) -> Option<i32> {
    let max = readings.iter().map(|r| r.temperature).max()?;
    let min = readings.iter().map(|r| r.temperature).min()?;
    Some(max - min)
}

/// Round and clamp a percentage into 0..=100
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
