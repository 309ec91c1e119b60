use serde::{Deserialize, Serialize};

use crate::routing::Port;

/// Configuration of the shipment lifecycle
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LifecycleConfig {
    /// Place confirmed shipments directly into the container found by the capacity check.
    /// If false, confirmed shipments stay Pending until the next optimization pass.
    pub place_on_confirm: bool,
    /// Restrict optimization to containers of the class booked by the shipment
    pub respect_container_class: bool,
    /// How order ids are generated
    pub order_ids: OrderIdScheme,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            place_on_confirm: true,
            respect_container_class: true,
            order_ids: OrderIdScheme::Timestamp,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderIdScheme {
    /// `ORD-<unix millis>`, two orders created within the same millisecond collide
    Timestamp,
    /// `ORD-1`, `ORD-2`, ... continuing after the highest numeric id already known
    Sequential,
}

///Configuration of the geocoding distance provider
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouterConfig {
    /// Destinations containing one of these keywords (case-insensitive) are reached by road only
    pub domestic_keywords: Vec<String>,
    /// Candidate ports for the sea leg of non-domestic routes
    pub ports: Vec<Port>,
    /// Inflation applied to great-circle distances of road legs
    pub road_factor: f64,
    /// Inflation applied to great-circle distances of sea legs
    pub sea_factor: f64,
    /// Maximum time a single geocoding lookup may take before falling back to the distance table
    pub geocode_timeout_ms: u64,
    /// Distance used when no keyword of the distance table matches
    pub fallback_km: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            domestic_keywords: vec!["turkey".to_string(), "türkiye".to_string()],
            ports: vec![
                Port::new("Izmir", 38.423734, 27.142826),
                Port::new("Mersin", 36.8121, 34.6415),
                Port::new("Istanbul", 41.0082, 28.9784),
                Port::new("Antalya", 36.8969, 30.7133),
            ],
            road_factor: 1.3,
            sea_factor: 1.1,
            geocode_timeout_ms: 5000,
            fallback_km: 2000,
        }
    }
}
