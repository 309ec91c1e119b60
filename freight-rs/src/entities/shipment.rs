use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::entities::{ContainerClass, ContainerId};

/// Lifecycle status of a [`Shipment`]. Statuses only move forward, [`ShipmentStatus::Delivered`] is terminal.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShipmentStatus {
    Pending,
    Ready,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    /// Step of the tracking timeline (1 to 4)
    pub fn tracking_stage(self) -> u8 {
        match self {
            ShipmentStatus::Pending => 1,
            ShipmentStatus::Ready => 2,
            ShipmentStatus::InTransit => 3,
            ShipmentStatus::Delivered => 4,
        }
    }

    /// Human readable label shown on the tracking page
    pub fn tracking_label(self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::Ready => "Ready for Transport",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ShipmentStatus::Delivered
    }
}

impl Display for ShipmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::Ready => "Ready",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "pending" => Ok(ShipmentStatus::Pending),
            "ready" => Ok(ShipmentStatus::Ready),
            "intransit" => Ok(ShipmentStatus::InTransit),
            "delivered" => Ok(ShipmentStatus::Delivered),
            _ => Err(format!("unknown shipment status: {s}")),
        }
    }
}

/// Id and name of a vehicle servicing a shipment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VehicleRef {
    pub id: String,
    pub name: String,
}

/// Raw shipment request as entered by a customer
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShipmentForm {
    pub customer_name: String,
    pub product_name: String,
    pub category: String,
    /// Requested weight in kg, validated to be positive
    pub weight: i64,
    pub container_class: ContainerClass,
    pub destination_city: String,
    pub destination_country: String,
}

impl ShipmentForm {
    /// Destination label used for routing, "city, country"
    pub fn destination(&self) -> String {
        format!(
            "{}, {}",
            self.destination_city.trim(),
            self.destination_country.trim()
        )
    }
}

/// A shipment of goods from the depot to a destination.
/// Shipments are never deleted, delivered ones stay available for tracking.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shipment {
    pub order_id: String,
    pub customer_name: String,
    pub product_name: String,
    pub category: String,
    /// Weight in kg
    pub weight: u32,
    pub container_class: ContainerClass,
    pub destination: String,
    /// Total distance in km
    pub distance: u32,
    pub domestic_truck_km: u32,
    pub sea_km: u32,
    /// Port the sea leg departs from, if any
    pub origin_port: Option<String>,
    pub price: u64,
    pub delivery_date: Date,
    pub created_at: Timestamp,
    pub status: ShipmentStatus,
    /// Container holding the shipment, set once placed
    #[serde(default)]
    pub container_id: Option<ContainerId>,
    /// Truck servicing the road leg, set once dispatched
    #[serde(default)]
    pub truck: Option<VehicleRef>,
    /// Ship servicing the sea leg, set once dispatched
    #[serde(default)]
    pub ship: Option<VehicleRef>,
}

impl Shipment {
    pub fn has_sea_leg(&self) -> bool {
        self.sea_km > 0
    }

    /// True if every leg of the route has a vehicle assigned
    pub fn is_fully_dispatched(&self) -> bool {
        self.truck.is_some() && (!self.has_sea_leg() || self.ship.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ordering_follows_the_lifecycle() {
        assert!(ShipmentStatus::Pending < ShipmentStatus::Ready);
        assert!(ShipmentStatus::Ready < ShipmentStatus::InTransit);
        assert!(ShipmentStatus::InTransit < ShipmentStatus::Delivered);
        assert!(ShipmentStatus::Delivered.is_terminal());
    }

    #[test]
    fn status_parses_common_spellings() {
        for s in ["In Transit", "in-transit", "IN_TRANSIT", "intransit"] {
            assert_eq!(s.parse::<ShipmentStatus>(), Ok(ShipmentStatus::InTransit));
        }
        assert!("lost".parse::<ShipmentStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_a_space() {
        let json = serde_json::to_string(&ShipmentStatus::InTransit).unwrap();
        assert_eq!(json, "\"In Transit\"");
    }
}
