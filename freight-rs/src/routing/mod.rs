use std::future::Future;

use serde::{Deserialize, Serialize};

mod fallback;
mod geo;
mod geo_router;
mod geocoder;

#[doc(inline)]
pub use fallback::FallbackRouter;
#[doc(inline)]
pub use geo::Coord;
#[doc(inline)]
pub use geo::haversine_km;
#[doc(inline)]
pub use geo_router::GeoRouter;
#[doc(inline)]
pub use geocoder::Geocoder;
#[doc(inline)]
pub use geocoder::StaticGeocoder;

/// Decomposition of a route into a road leg and an optional sea leg, in whole km.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub domestic_km: u32,
    pub sea_km: u32,
    pub total_km: u32,
    /// Port where the sea leg starts
    pub origin_port: Option<String>,
}

impl Route {
    pub fn road_only(km: u32) -> Self {
        Route {
            domestic_km: km,
            sea_km: 0,
            total_km: km,
            origin_port: None,
        }
    }

    pub fn via_port(road_km: u32, sea_km: u32, port: &str) -> Self {
        Route {
            domestic_km: road_km,
            sea_km,
            total_km: road_km + sea_km,
            origin_port: Some(port.to_string()),
        }
    }
}

/// A coastal transit point for the sea leg of a route
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Port {
    pub name: String,
    pub coord: Coord,
}

impl Port {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Port {
            name: name.to_string(),
            coord: Coord { lat, lon },
        }
    }
}

/// Source of route decompositions. Route lookups never fail, implementations fall back to an estimate instead.
pub trait DistanceProvider {
    fn route(&self, origin: &str, destination: &str) -> impl Future<Output = Route> + Send;
}
