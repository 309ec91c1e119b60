use std::collections::HashMap;
use std::future::Future;

use anyhow::Result;

use crate::routing::Coord;

/// Resolves a place label ("city, country") to coordinates.
/// `Ok(None)` means the label is unknown, `Err` means the lookup itself failed.
pub trait Geocoder {
    fn locate(&self, label: &str) -> impl Future<Output = Result<Option<Coord>>> + Send;
}

/// In-memory gazetteer. A label resolves through the first of its comma separated parts
/// that is a known place name (case-insensitive).
#[derive(Clone, Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coord>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gazetteer with the depot region, its ports and the main european destinations
    pub fn with_defaults() -> Self {
        let mut geocoder = Self::new();
        for (name, lat, lon) in DEFAULT_PLACES {
            geocoder.insert(name, Coord::new(*lat, *lon));
        }
        geocoder
    }

    pub fn insert(&mut self, name: &str, coord: Coord) {
        self.places.insert(name.trim().to_lowercase(), coord);
    }

    pub fn lookup(&self, label: &str) -> Option<Coord> {
        label
            .split(',')
            .map(|part| part.trim().to_lowercase())
            .find_map(|part| self.places.get(&part).copied())
    }
}

impl Geocoder for StaticGeocoder {
    async fn locate(&self, label: &str) -> Result<Option<Coord>> {
        Ok(self.lookup(label))
    }
}

const DEFAULT_PLACES: &[(&str, f64, f64)] = &[
    ("Muğla", 37.2153, 28.3636),
    ("Izmir", 38.423734, 27.142826),
    ("Istanbul", 41.0082, 28.9784),
    ("Ankara", 39.9334, 32.8597),
    ("Antalya", 36.8969, 30.7133),
    ("Mersin", 36.8121, 34.6415),
    ("Bodrum", 37.0344, 27.4305),
    ("Berlin", 52.52, 13.405),
    ("Hamburg", 53.5511, 9.9937),
    ("Paris", 48.8566, 2.3522),
    ("London", 51.5074, -0.1278),
    ("Rome", 41.9028, 12.4964),
    ("Madrid", 40.4168, -3.7038),
    ("Amsterdam", 52.3676, 4.9041),
    ("Rotterdam", 51.9244, 4.4777),
    ("Vienna", 48.2082, 16.3738),
    ("Athens", 37.9838, 23.7275),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_the_first_known_part() {
        let geocoder = StaticGeocoder::with_defaults();
        assert_eq!(geocoder.lookup("Paris, France"), Some(Coord::new(48.8566, 2.3522)));
        assert_eq!(geocoder.lookup("somewhere, BERLIN"), Some(Coord::new(52.52, 13.405)));
        assert_eq!(geocoder.lookup("Lyon, France"), None);
    }
}
