use log::debug;

use crate::routing::{DistanceProvider, Route};

/// Estimates distances from the destination label alone, using an ordered keyword table.
/// The first keyword contained in the destination (case-insensitive) determines the distance.
#[derive(Clone, Debug)]
pub struct FallbackRouter {
    table: Vec<(String, u32)>,
    default_km: u32,
}

impl FallbackRouter {
    pub fn new(table: Vec<(String, u32)>, default_km: u32) -> Self {
        let table = table
            .into_iter()
            .map(|(keyword, km)| (keyword.to_lowercase(), km))
            .collect();
        Self { table, default_km }
    }

    /// Default table with `default_km` for unmatched destinations
    pub fn with_default_km(default_km: u32) -> Self {
        let table = DEFAULT_TABLE
            .iter()
            .map(|(keyword, km)| (keyword.to_string(), *km))
            .collect();
        Self::new(table, default_km)
    }

    pub fn estimate(&self, destination: &str) -> u32 {
        let dest = destination.to_lowercase();
        let km = self
            .table
            .iter()
            .find(|(keyword, _)| dest.contains(keyword.as_str()))
            .map_or(self.default_km, |(_, km)| *km);
        debug!("[ROUTE] estimated {km} km to {destination}");
        km
    }
}

impl Default for FallbackRouter {
    fn default() -> Self {
        Self::with_default_km(2000)
    }
}

impl DistanceProvider for FallbackRouter {
    async fn route(&self, _origin: &str, destination: &str) -> Route {
        Route::road_only(self.estimate(destination))
    }
}

const DEFAULT_TABLE: &[(&str, u32)] = &[
    ("Berlin", 3000),
    ("Germany", 3000),
    ("Paris", 2500),
    ("France", 2500),
    ("London", 3000),
    ("UK", 3000),
    ("England", 3000),
    ("Rome", 1500),
    ("Italy", 1500),
    ("Madrid", 3200),
    ("Spain", 3200),
    ("Amsterdam", 2400),
    ("Netherlands", 2400),
    ("Vienna", 1400),
    ("Austria", 1400),
    ("Athens", 900),
    ("Greece", 900),
    ("Istanbul", 600),
    ("Turkey", 600),
    ("Ankara", 450),
    ("Izmir", 150),
    ("Antalya", 250),
    ("Brussels", 2600),
    ("Belgium", 2600),
    ("Copenhagen", 2400),
    ("Denmark", 2400),
    ("Stockholm", 2800),
    ("Sweden", 2800),
    ("Oslo", 3000),
    ("Norway", 3000),
    ("Helsinki", 2900),
    ("Finland", 2900),
    ("Warsaw", 1800),
    ("Poland", 1800),
    ("Prague", 1700),
    ("Czech", 1700),
    ("Budapest", 1300),
    ("Hungary", 1300),
    ("Bucharest", 900),
    ("Romania", 900),
    ("Sofia", 600),
    ("Bulgaria", 600),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_keyword_wins() {
        let router = FallbackRouter::default();
        assert_eq!(router.estimate("Berlin, Germany"), 3000);
        assert_eq!(router.estimate("lyon, FRANCE"), 2500);
        // "turkey" precedes "ankara" in the table
        assert_eq!(router.estimate("Ankara, Turkey"), 600);
        assert_eq!(router.estimate("Ankara"), 450);
    }

    #[test]
    fn unmatched_destinations_use_the_default() {
        assert_eq!(FallbackRouter::default().estimate("Lisbon, Portugal"), 2000);
        assert_eq!(FallbackRouter::with_default_km(1234).estimate("Nowhere"), 1234);
    }

    #[tokio::test]
    async fn fallback_routes_are_road_only() {
        let route = FallbackRouter::default().route("Muğla, Turkey", "Rome, Italy").await;
        assert_eq!(route, Route::road_only(1500));
    }
}
