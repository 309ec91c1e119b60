use serde::{Deserialize, Serialize};

/// Mean radius of the earth in km
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in degrees
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coord { lat, lon }
    }
}

/// Great-circle distance between two coordinates in km
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn haversine_matches_known_distances() {
        let paris = Coord::new(48.8566, 2.3522);
        let london = Coord::new(51.5074, -0.1278);
        let d = haversine_km(paris, london);
        assert!(approx_eq!(f64, d, 343.5, epsilon = 2.0), "got {d}");
        assert!(approx_eq!(f64, haversine_km(paris, paris), 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, haversine_km(london, paris), d, epsilon = 1e-9));
    }
}
