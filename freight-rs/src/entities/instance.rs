use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{Container, ContainerClass, InventoryItem, Vehicle, VehicleKind};

/// Initial state of a depot: its fixed set of containers, the fleet and the opening inventory.
/// Containers and vehicles are never created or destroyed after initialization.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DepotInstance {
    /// Location every route starts from
    #[serde(default = "default_origin")]
    pub origin: String,
    pub containers: Vec<Container>,
    pub trucks: Vec<Vehicle>,
    pub ships: Vec<Vehicle>,
    pub inventory: Vec<InventoryItem>,
}

impl DepotInstance {
    pub fn new(
        origin: &str,
        containers: Vec<Container>,
        trucks: Vec<Vehicle>,
        ships: Vec<Vehicle>,
        inventory: Vec<InventoryItem>,
    ) -> Result<Self> {
        let instance = Self {
            origin: origin.to_string(),
            containers,
            trucks,
            ships,
            inventory,
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Checks the structural requirements of an instance, used when loading one from a file.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.containers.iter().map(|c| c.id).all_unique(),
            "container ids must be unique: {:?}",
            self.containers.iter().map(|c| c.id).collect_vec()
        );
        ensure!(
            self.containers.iter().all(|c| c.is_empty()),
            "containers of an instance must start empty"
        );
        ensure!(
            self.trucks.iter().chain(self.ships.iter()).map(|v| &v.id).all_unique(),
            "vehicle ids must be unique"
        );
        ensure!(
            self.trucks.iter().all(|t| t.kind == VehicleKind::Truck)
                && self.ships.iter().all(|s| s.kind == VehicleKind::Ship),
            "trucks and ships must be listed under their own kind"
        );
        ensure!(
            self.inventory.iter().map(|i| &i.category).all_unique(),
            "inventory categories must be unique"
        );
        Ok(())
    }

    /// Instance with no containers, vehicles or stock. Useful as a base for tailored setups.
    pub fn empty() -> Self {
        Self {
            origin: default_origin(),
            containers: vec![],
            trucks: vec![],
            ships: vec![],
            inventory: vec![],
        }
    }
}

impl Default for DepotInstance {
    fn default() -> Self {
        let containers = vec![
            Container::new(1, ContainerClass::Small),
            Container::new(2, ContainerClass::Medium),
            Container::new(3, ContainerClass::Large),
            Container::new(4, ContainerClass::Large),
        ];
        let trucks = vec![
            Vehicle::new("T001", "RoadKing", VehicleKind::Truck, 10000, 8, 3000, 2000),
            Vehicle::new("T002", "FastMove", VehicleKind::Truck, 12000, 9, 3500, 2500),
            Vehicle::new("T003", "CargoPro", VehicleKind::Truck, 9000, 7, 2800, 2000),
            Vehicle::new("T004", "HeavyLoad", VehicleKind::Truck, 15000, 10, 4000, 3000),
        ];
        let ships = vec![
            Vehicle::new("S001", "BlueSea", VehicleKind::Ship, 100000, 40, 20000, 10000),
            Vehicle::new("S002", "OceanStar", VehicleKind::Ship, 120000, 50, 25000, 12000),
            Vehicle::new("S003", "AegeanWind", VehicleKind::Ship, 90000, 35, 18000, 8000),
        ];
        let inventory = vec![
            InventoryItem::new("Fresh", 4500, 2000),
            InventoryItem::new("Frozen", 1200, 1000),
            InventoryItem::new("Organic", 8000, 2500),
        ];
        Self {
            origin: default_origin(),
            containers,
            trucks,
            ships,
            inventory,
        }
    }
}

fn default_origin() -> String {
    "Muğla, Turkey".to_string()
}
