use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Truck,
    Ship,
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleKind::Truck => write!(f, "truck"),
            VehicleKind::Ship => write!(f, "ship"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleStatus {
    Available,
    Busy,
}

/// A truck or ship of the fleet. A vehicle services at most one shipment at a time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub kind: VehicleKind,
    /// Advisory capacity in kg, never blocks a dispatch
    pub capacity: u32,
    /// Fuel cost per km
    pub fuel_cost: u64,
    /// Crew cost for ships, driver cost for trucks
    pub crew_cost: u64,
    pub maintenance: u64,
    pub status: VehicleStatus,
    #[serde(default)]
    pub current_order_id: Option<String>,
}

impl Vehicle {
    pub fn new(
        id: &str,
        name: &str,
        kind: VehicleKind,
        capacity: u32,
        fuel_cost: u64,
        crew_cost: u64,
        maintenance: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            capacity,
            fuel_cost,
            crew_cost,
            maintenance,
            status: VehicleStatus::Available,
            current_order_id: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn occupy(&mut self, order_id: &str) {
        debug_assert!(self.is_available(), "vehicle {} is already busy", self.id);
        self.status = VehicleStatus::Busy;
        self.current_order_id = Some(order_id.to_string());
    }

    pub fn free(&mut self) {
        self.status = VehicleStatus::Available;
        self.current_order_id = None;
    }

    /// Crew and maintenance, independent of the distance travelled
    pub fn fixed_cost(&self) -> u64 {
        self.crew_cost + self.maintenance
    }

    /// Cost of a single trip over `km`
    pub fn trip_cost(&self, km: u32) -> u64 {
        self.fuel_cost * km as u64 + self.fixed_cost()
    }
}
