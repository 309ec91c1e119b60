use itertools::Itertools;
use log::error;

use crate::engine::{ContainerYard, Fleet};
use crate::entities::{Container, ContainerStatus, Shipment, ShipmentStatus};

//Various checks to verify correctness of the state of the depot
//Used in debug_assert!() blocks

pub fn container_is_consistent(c: &Container) -> bool {
    let summed = c.load_records().iter().map(|r| r.weight as u64).sum::<u64>();
    let expected_status = match c.is_empty() {
        true => ContainerStatus::Available,
        false => ContainerStatus::Ready,
    };
    if summed != c.current_load() as u64 || c.status() != expected_status || summed > c.capacity as u64 {
        error!(
            "container {} inconsistent: load {} (records sum {}), capacity {}, status {:?}",
            c.id,
            c.current_load(),
            summed,
            c.capacity,
            c.status()
        );
        return false;
    }
    true
}

pub fn yard_is_consistent(yard: &ContainerYard) -> bool {
    yard.containers().iter().all(container_is_consistent)
        && yard
            .containers()
            .iter()
            .flat_map(|c| c.load_records())
            .map(|r| &r.order_id)
            .all_unique()
}

/// No vehicle and no container may still reference a delivered shipment
pub fn delivered_are_released(shipments: &[Shipment], yard: &ContainerYard, fleet: &Fleet) -> bool {
    shipments
        .iter()
        .filter(|s| s.status == ShipmentStatus::Delivered)
        .all(|s| {
            let in_container = yard.containers().iter().any(|c| c.holds(&s.order_id));
            let on_vehicle = fleet.vehicles().any(|v| v.current_order_id.as_deref() == Some(s.order_id.as_str()));
            if in_container || on_vehicle {
                error!(
                    "delivered order {} still referenced (container: {in_container}, vehicle: {on_vehicle})",
                    s.order_id
                );
            }
            !in_container && !on_vehicle
        })
}

/// Every busy vehicle services a known shipment that is not yet delivered
pub fn vehicles_reference_live_shipments(shipments: &[Shipment], fleet: &Fleet) -> bool {
    fleet
        .vehicles()
        .filter_map(|v| v.current_order_id.as_deref())
        .all(|order_id| {
            shipments
                .iter()
                .find(|s| s.order_id == order_id)
                .is_some_and(|s| s.status != ShipmentStatus::Delivered)
        })
}

pub fn depot_is_consistent(shipments: &[Shipment], yard: &ContainerYard, fleet: &Fleet) -> bool {
    yard_is_consistent(yard)
        && delivered_are_released(shipments, yard, fleet)
        && vehicles_reference_live_shipments(shipments, fleet)
}
