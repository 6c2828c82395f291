use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// India Standard Time, UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// A city from the embedded catalog.
///
/// Two cities are the same city when their `(name, region)` pair matches;
/// coordinates and country are descriptive only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct City {
    pub name: &'static str,
    pub region: &'static str,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub const fn new(
        name: &'static str,
        region: &'static str,
        country: &'static str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name,
            region,
            country,
            latitude,
            longitude,
        }
    }

    /// "Mumbai, Maharashtra"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.region)
    }

    /// Fixed UTC offset used to render local clock times for this city
    pub fn utc_offset(&self) -> FixedOffset {
        match self.country {
            "India" => FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix()),
            _ => Utc.fix(),
        }
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.region == other.region
    }
}

impl Eq for City {}

impl Hash for City {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.region.hash(state);
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
