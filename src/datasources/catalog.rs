use crate::models::City;

/// Maximum number of suggestions returned by [`search`]
pub const MAX_SUGGESTIONS: usize = 5;

pub const CITIES: [City; 20] = [
    City::new("Mumbai", "Maharashtra", "India", 19.0760, 72.8777),
    City::new("Delhi", "Delhi", "India", 28.7041, 77.1025),
    City::new("Bangalore", "Karnataka", "India", 12.9716, 77.5946),
    City::new("Hyderabad", "Telangana", "India", 17.3850, 78.4867),
    City::new("Ahmedabad", "Gujarat", "India", 23.0225, 72.5714),
    City::new("Chennai", "Tamil Nadu", "India", 13.0827, 80.2707),
    City::new("Kolkata", "West Bengal", "India", 22.5726, 88.3639),
    City::new("Surat", "Gujarat", "India", 21.1702, 72.8311),
    City::new("Pune", "Maharashtra", "India", 18.5204, 73.8567),
    City::new("Jaipur", "Rajasthan", "India", 26.9124, 75.7873),
    City::new("Lucknow", "Uttar Pradesh", "India", 26.8467, 80.9462),
    City::new("Kanpur", "Uttar Pradesh", "India", 26.4499, 80.3319),
    City::new("Nagpur", "Maharashtra", "India", 21.1458, 79.0882),
    City::new("Indore", "Madhya Pradesh", "India", 22.7196, 75.8577),
    City::new("Thane", "Maharashtra", "India", 19.2183, 72.9781),
    City::new("Bhopal", "Madhya Pradesh", "India", 23.2599, 77.4126),
    City::new("Visakhapatnam", "Andhra Pradesh", "India", 17.6868, 83.2185),
    City::new("Patna", "Bihar", "India", 25.5941, 85.1376),
    City::new("Vadodara", "Gujarat", "India", 22.3072, 73.1812),
    City::new("Ghaziabad", "Uttar Pradesh", "India", 28.6692, 77.4538),
];

/// Cities whose name or region contains `query`, ignoring case.
///
/// Results keep catalog order and are capped at [`MAX_SUGGESTIONS`].
/// An empty query matches nothing.
pub fn search(query: &str) -> Vec<City> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    CITIES
        .iter()
        .filter(|city| {
            city.name.to_lowercase().contains(&needle)
                || city.region.to_lowercase().contains(&needle)
        })
        .take(MAX_SUGGESTIONS)
        .copied()
        .collect()
}

/// Exact, case-insensitive lookup by city name
pub fn find(name: &str) -> Option<City> {
    let name = name.trim();
    CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
        .copied()
}
