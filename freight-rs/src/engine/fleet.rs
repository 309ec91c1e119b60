use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entities::{Shipment, Vehicle, VehicleKind, VehicleRef};

/// Owner of the trucks and ships of the depot.
/// Dispatch is advisory: a shipment without an available vehicle simply proceeds unassigned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Fleet {
    pub trucks: Vec<Vehicle>,
    pub ships: Vec<Vehicle>,
}

/// Vehicles assigned during a single dispatch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub truck: Option<VehicleRef>,
    pub ship: Option<VehicleRef>,
}

impl Fleet {
    pub fn new(trucks: Vec<Vehicle>, ships: Vec<Vehicle>) -> Self {
        Self { trucks, ships }
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.trucks.iter().chain(self.ships.iter())
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles().find(|v| v.id == id)
    }

    /// Assigns a truck and, if the route has a sea leg, a ship to the shipment.
    /// Legs which already have a vehicle are left untouched.
    /// Returns the vehicles newly assigned by this call.
    pub fn assign(&mut self, shipment: &mut Shipment) -> Dispatch {
        let mut dispatch = Dispatch::default();

        if shipment.truck.is_none() {
            match acquire(&mut self.trucks, &shipment.order_id, shipment.weight) {
                Some(truck) => {
                    shipment.truck = Some(truck.clone());
                    dispatch.truck = Some(truck);
                }
                None => warn!(
                    "[FLEET] no truck available for {}, proceeding without one",
                    shipment.order_id
                ),
            }
        }

        if shipment.has_sea_leg() && shipment.ship.is_none() {
            match acquire(&mut self.ships, &shipment.order_id, shipment.weight) {
                Some(ship) => {
                    shipment.ship = Some(ship.clone());
                    dispatch.ship = Some(ship);
                }
                None => warn!(
                    "[FLEET] no ship available for {}, proceeding without one",
                    shipment.order_id
                ),
            }
        }

        dispatch
    }

    /// Frees every vehicle servicing `order_id`. Returns the number of vehicles released.
    pub fn release(&mut self, order_id: &str) -> usize {
        let mut n_released = 0;
        for vehicle in self.trucks.iter_mut().chain(self.ships.iter_mut()) {
            if vehicle.current_order_id.as_deref() == Some(order_id) {
                vehicle.free();
                debug!("[FLEET] {} {} released from {order_id}", vehicle.kind, vehicle.id);
                n_released += 1;
            }
        }
        n_released
    }

    /// Frees every busy vehicle whose order is not `live`. Returns the number of vehicles released.
    pub fn release_stale(&mut self, live: &HashSet<&str>) -> usize {
        let mut n_released = 0;
        for vehicle in self.trucks.iter_mut().chain(self.ships.iter_mut()) {
            let stale = match vehicle.current_order_id.as_deref() {
                Some(order_id) => !live.contains(order_id),
                None => !vehicle.is_available(),
            };
            if stale {
                warn!(
                    "[FLEET] freeing {} {} from stale order {:?}",
                    vehicle.kind, vehicle.id, vehicle.current_order_id
                );
                vehicle.free();
                n_released += 1;
            }
        }
        n_released
    }

    pub fn n_available(&self, kind: VehicleKind) -> usize {
        let pool = match kind {
            VehicleKind::Truck => &self.trucks,
            VehicleKind::Ship => &self.ships,
        };
        pool.iter().filter(|v| v.is_available()).count()
    }
}

/// Two-tier selection: the first available vehicle able to carry `weight`,
/// otherwise the first available vehicle regardless of its capacity.
fn acquire(pool: &mut [Vehicle], order_id: &str, weight: u32) -> Option<VehicleRef> {
    let idx = pool
        .iter()
        .position(|v| v.is_available() && v.capacity >= weight)
        .or_else(|| pool.iter().position(|v| v.is_available()))?;

    let vehicle = &mut pool[idx];
    if vehicle.capacity < weight {
        warn!(
            "[FLEET] {} {} ({} kg) dispatched for {order_id} carrying {weight} kg",
            vehicle.kind, vehicle.id, vehicle.capacity
        );
    }
    vehicle.occupy(order_id);
    debug!("[FLEET] {} {} assigned to {order_id}", vehicle.kind, vehicle.id);

    Some(VehicleRef {
        id: vehicle.id.clone(),
        name: vehicle.name.clone(),
    })
}
