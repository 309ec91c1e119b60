use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::FreightError;
use crate::entities::{Container, ContainerClass, ContainerId, ContainerStatus, LoadRecord};
use crate::util::assertions;

/// Owner of the fixed set of containers of the depot.
/// Performs capacity checks and places shipments into containers.
/// The stored order of the containers is the scan order of every search.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct ContainerYard {
    containers: Vec<Container>,
}

impl ContainerYard {
    pub fn new(containers: Vec<Container>) -> Self {
        let mut yard = Self { containers };
        yard.recompute_all();
        yard
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Finds the first [`ContainerStatus::Available`] container of `class` with room for `weight` kg.
    pub fn check_capacity(
        &self,
        class: ContainerClass,
        weight: u32,
    ) -> Result<ContainerId, FreightError> {
        self.containers
            .iter()
            .find(|c| c.class == class && c.status() == ContainerStatus::Available && c.fits(weight))
            .map(|c| c.id)
            .ok_or_else(|| {
                FreightError::Capacity(format!(
                    "insufficient space in {class} containers for {weight} kg"
                ))
            })
    }

    /// First container in stored order with room for `weight` kg, optionally restricted to a class.
    /// The container status is not taken into account.
    pub fn first_fit(&self, weight: u32, class: Option<ContainerClass>) -> Option<ContainerId> {
        self.containers
            .iter()
            .filter(|c| class.is_none_or(|class| c.class == class))
            .find(|c| c.fits(weight))
            .map(|c| c.id)
    }

    /// Appends a load record to the container.
    /// Fails if the container is unknown or does not have enough free capacity left.
    pub fn place(&mut self, id: ContainerId, record: LoadRecord) -> Result<(), FreightError> {
        let container = self
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FreightError::NotFound(format!("container {id}")))?;
        if !container.fits(record.weight) {
            return Err(FreightError::Capacity(format!(
                "container {id} has {} kg left, {} kg requested",
                container.free_capacity(),
                record.weight
            )));
        }
        debug!(
            "[YARD] placing {} ({} kg) in {} container {}",
            record.order_id, record.weight, container.class, id
        );
        container.place(record);

        debug_assert!(assertions::yard_is_consistent(self));
        Ok(())
    }

    /// Removes the load record of `order_id` from container `id`.
    /// Returns the removed record, if it was present.
    pub fn release(&mut self, id: ContainerId, order_id: &str) -> Option<LoadRecord> {
        let released = self
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .and_then(|c| c.release(order_id));
        if released.is_some() {
            debug!("[YARD] released {order_id} from container {id}");
        }
        released
    }

    /// Drops the load records of all `delivered` orders and recomputes every container.
    /// Returns the number of removed records.
    pub fn collect_delivered(&mut self, delivered: &HashSet<&str>) -> usize {
        let removed = self
            .containers
            .iter_mut()
            .map(|c| c.retain_records(|r| !delivered.contains(r.order_id.as_str())))
            .sum();
        if removed > 0 {
            debug!("[YARD] collected {removed} load records of delivered shipments");
        }
        removed
    }

    /// Repairs load records restored from a store.
    /// Keeps only records of `live` orders, the first record of every order and, per container,
    /// the records that fit within its capacity in stored order. Returns the number of dropped records.
    pub fn reconcile(&mut self, live: &HashSet<&str>) -> usize {
        let mut seen = HashSet::new();
        let mut dropped = 0;
        for c in self.containers.iter_mut() {
            let id = c.id;
            let capacity = c.capacity as u64;
            let mut load = 0u64;
            dropped += c.retain_records(|r| {
                let keep = live.contains(r.order_id.as_str())
                    && !seen.contains(&r.order_id)
                    && load + r.weight as u64 <= capacity;
                if keep {
                    load += r.weight as u64;
                    seen.insert(r.order_id.clone());
                } else {
                    warn!("[YARD] dropping stale load record of {} from container {id}", r.order_id);
                }
                keep
            });
        }
        debug_assert!(assertions::yard_is_consistent(self));
        dropped
    }

    /// Derives load and status of every container from its load records.
    pub fn recompute_all(&mut self) {
        self.containers.iter_mut().for_each(|c| c.recompute());
    }

    pub fn total_capacity(&self) -> u64 {
        self.containers.iter().map(|c| c.capacity as u64).sum()
    }

    pub fn total_load(&self) -> u64 {
        self.containers.iter().map(|c| c.current_load() as u64).sum()
    }

    /// Ratio of total load to total capacity
    pub fn utilization(&self) -> f64 {
        match self.total_capacity() {
            0 => 0.0,
            cap => self.total_load() as f64 / cap as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(order_id: &str, weight: u32) -> LoadRecord {
        LoadRecord {
            order_id: order_id.to_string(),
            weight,
            customer: "ACME".to_string(),
        }
    }

    fn yard() -> ContainerYard {
        ContainerYard::new(vec![
            Container::new(1, ContainerClass::Small),
            Container::new(2, ContainerClass::Medium),
            Container::new(3, ContainerClass::Large),
            Container::new(4, ContainerClass::Large),
        ])
    }

    #[test]
    fn capacity_check_skips_containers_that_are_already_loaded() {
        let mut yard = yard();
        assert_eq!(yard.check_capacity(ContainerClass::Large, 4000), Ok(3));
        yard.place(3, record("ORD-1", 4000)).unwrap();
        // container 3 is Ready now, the check moves on to the next Available one
        assert_eq!(yard.check_capacity(ContainerClass::Large, 1000), Ok(4));
    }

    #[test]
    fn capacity_check_fails_without_room() {
        let mut yard = yard();
        yard.place(1, record("ORD-1", 1500)).unwrap();
        let err = yard.check_capacity(ContainerClass::Small, 800).unwrap_err();
        assert!(matches!(err, FreightError::Capacity(_)));
    }

    #[test]
    fn first_fit_scans_in_stored_order() {
        let mut yard = yard();
        assert_eq!(yard.first_fit(4000, None), Some(2));
        assert_eq!(yard.first_fit(4000, Some(ContainerClass::Large)), Some(3));
        assert_eq!(yard.first_fit(10001, None), None);

        yard.place(3, record("ORD-1", 9000)).unwrap();
        assert_eq!(yard.first_fit(2000, Some(ContainerClass::Large)), Some(4));
        assert_eq!(yard.first_fit(1000, Some(ContainerClass::Large)), Some(3));
    }

    #[test]
    fn place_rejects_overload() {
        let mut yard = yard();
        assert!(yard.place(1, record("ORD-1", 2001)).is_err());
        assert!(yard.place(99, record("ORD-1", 1)).is_err());
        assert!(yard.container(1).unwrap().is_empty());
    }

    /// Yard as restored from a store, without any of the checks of [`ContainerYard::place`]
    fn restored(records: Vec<(ContainerId, LoadRecord)>) -> ContainerYard {
        let mut value = serde_json::to_value(yard()).unwrap();
        for (id, r) in records {
            let c = value
                .as_array_mut()
                .unwrap()
                .iter_mut()
                .find(|c| c["id"] == id)
                .unwrap();
            c["load_records"].as_array_mut().unwrap().push(serde_json::to_value(r).unwrap());
        }
        let mut yard: ContainerYard = serde_json::from_value(value).unwrap();
        yard.recompute_all();
        yard
    }

    #[test]
    fn reconcile_drops_dead_duplicate_and_overflowing_records() {
        let mut yard = restored(vec![
            (1, record("ORD-4", 1500)),
            (1, record("ORD-5", 1500)),
            (2, record("ORD-3", 1000)),
            (3, record("ORD-1", 6000)),
            (3, record("ORD-2", 3000)),
            (4, record("ORD-2", 500)),
        ]);
        assert!(!assertions::yard_is_consistent(&yard));

        // ORD-3 was delivered
        let live = HashSet::from(["ORD-1", "ORD-2", "ORD-4", "ORD-5"]);
        assert_eq!(yard.reconcile(&live), 3);
        assert!(assertions::yard_is_consistent(&yard));
        assert_eq!(yard.container(1).unwrap().current_load(), 1500);
        assert!(yard.container(1).unwrap().holds("ORD-4"));
        assert!(yard.container(2).unwrap().is_empty());
        assert_eq!(yard.container(3).unwrap().current_load(), 9000);
        assert!(yard.container(4).unwrap().is_empty());
        assert_eq!(yard.reconcile(&live), 0);
    }

    #[test]
    fn collect_delivered_recomputes_every_container() {
        let mut yard = yard();
        yard.place(3, record("ORD-1", 3000)).unwrap();
        yard.place(3, record("ORD-2", 2000)).unwrap();
        yard.place(2, record("ORD-3", 1000)).unwrap();

        let delivered = HashSet::from(["ORD-1", "ORD-3"]);
        assert_eq!(yard.collect_delivered(&delivered), 2);

        let c3 = yard.container(3).unwrap();
        assert_eq!(c3.current_load(), 2000);
        assert_eq!(c3.status(), ContainerStatus::Ready);
        let c2 = yard.container(2).unwrap();
        assert_eq!(c2.current_load(), 0);
        assert_eq!(c2.status(), ContainerStatus::Available);
        assert!(assertions::yard_is_consistent(&yard));
    }

    #[test]
    fn utilization_over_the_whole_yard() {
        let mut yard = yard();
        assert_eq!(yard.total_capacity(), 27000);
        yard.place(4, record("ORD-1", 2700)).unwrap();
        assert!((yard.utilization() - 0.1).abs() < 1e-9);
    }
}
