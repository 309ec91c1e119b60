use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::assertions;

pub type ContainerId = u32;

/// Size class of a container. Every class has a fixed capacity and a price rate per km.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerClass {
    Small,
    Medium,
    Large,
}

impl ContainerClass {
    pub const ALL: [ContainerClass; 3] = [
        ContainerClass::Small,
        ContainerClass::Medium,
        ContainerClass::Large,
    ];

    /// Maximum load in kg
    pub fn capacity(self) -> u32 {
        match self {
            ContainerClass::Small => 2000,
            ContainerClass::Medium => 5000,
            ContainerClass::Large => 10000,
        }
    }

    /// Price per km of a shipment booked in this class
    pub fn rate(self) -> u64 {
        match self {
            ContainerClass::Small => 5,
            ContainerClass::Medium => 8,
            ContainerClass::Large => 12,
        }
    }
}

impl Display for ContainerClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContainerClass::Small => "Small",
            ContainerClass::Medium => "Medium",
            ContainerClass::Large => "Large",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ContainerClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(ContainerClass::Small),
            "medium" => Ok(ContainerClass::Medium),
            "large" => Ok(ContainerClass::Large),
            other => Err(format!("unknown container class: {other}")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerStatus {
    /// No shipments loaded
    Available,
    /// At least one shipment loaded
    Ready,
}

/// A shipment placed inside a [`Container`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoadRecord {
    pub order_id: String,
    pub weight: u32,
    pub customer: String,
}

/// A physical container of the depot.
/// The current load always equals the summed weight of the load records,
/// and the status is [`ContainerStatus::Ready`] iff at least one record is present.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Container {
    pub id: ContainerId,
    pub class: ContainerClass,
    pub capacity: u32,
    current_load: u32,
    status: ContainerStatus,
    load_records: Vec<LoadRecord>,
}

impl Container {
    pub fn new(id: ContainerId, class: ContainerClass) -> Self {
        Self {
            id,
            class,
            capacity: class.capacity(),
            current_load: 0,
            status: ContainerStatus::Available,
            load_records: vec![],
        }
    }

    pub fn current_load(&self) -> u32 {
        self.current_load
    }

    pub fn status(&self) -> ContainerStatus {
        self.status
    }

    pub fn load_records(&self) -> &[LoadRecord] {
        &self.load_records
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.current_load)
    }

    /// True if `weight` kg still fits in the container
    pub fn fits(&self, weight: u32) -> bool {
        self.free_capacity() >= weight
    }

    pub fn is_empty(&self) -> bool {
        self.load_records.is_empty()
    }

    pub fn holds(&self, order_id: &str) -> bool {
        self.load_records.iter().any(|r| r.order_id == order_id)
    }

    /// Fraction of the capacity in use, between 0 and 1
    pub fn utilization(&self) -> f64 {
        match self.capacity {
            0 => 0.0,
            cap => self.current_load as f64 / cap as f64,
        }
    }

    /// Appends a load record. The caller is responsible for checking [`Container::fits`] first.
    pub fn place(&mut self, record: LoadRecord) {
        debug_assert!(self.fits(record.weight), "container {} overloaded", self.id);
        self.current_load += record.weight;
        self.load_records.push(record);
        self.status = ContainerStatus::Ready;

        debug_assert!(assertions::container_is_consistent(self));
    }

    /// Removes the load record of `order_id`, if present, and recomputes load and status.
    pub fn release(&mut self, order_id: &str) -> Option<LoadRecord> {
        let idx = self
            .load_records
            .iter()
            .position(|r| r.order_id == order_id)?;
        let record = self.load_records.remove(idx);
        self.recompute();
        Some(record)
    }

    /// Keeps only the load records for which `keep` returns true.
    /// Returns the number of removed records.
    pub fn retain_records(&mut self, mut keep: impl FnMut(&LoadRecord) -> bool) -> usize {
        let before = self.load_records.len();
        self.load_records.retain(|r| keep(r));
        self.recompute();
        before - self.load_records.len()
    }

    /// Derives load and status from the load records.
    pub fn recompute(&mut self) {
        let summed = self.load_records.iter().map(|r| r.weight as u64).sum::<u64>();
        self.current_load = u32::try_from(summed).unwrap_or(u32::MAX);
        self.status = match self.load_records.is_empty() {
            true => ContainerStatus::Available,
            false => ContainerStatus::Ready,
        };
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

    #[test]
    fn place_and_release_keep_load_and_status_in_sync() {
        let mut c = Container::new(1, ContainerClass::Medium);
        assert_eq!(c.capacity, 5000);
        assert_eq!(c.status(), ContainerStatus::Available);

        c.place(record("ORD-1", 1200));
        c.place(record("ORD-2", 800));
        assert_eq!(c.current_load(), 2000);
        assert_eq!(c.free_capacity(), 3000);
        assert_eq!(c.status(), ContainerStatus::Ready);

        let removed = c.release("ORD-1").unwrap();
        assert_eq!(removed.weight, 1200);
        assert_eq!(c.current_load(), 800);
        assert_eq!(c.status(), ContainerStatus::Ready);

        assert!(c.release("ORD-1").is_none());
        c.release("ORD-2");
        assert_eq!(c.current_load(), 0);
        assert_eq!(c.status(), ContainerStatus::Available);
    }

    #[test]
    fn recompute_repairs_a_stale_load() {
        let mut c = Container::new(7, ContainerClass::Large);
        c.place(record("ORD-1", 4000));
        c.current_load = 9999;
        c.status = ContainerStatus::Available;
        c.recompute();
        assert_eq!(c.current_load(), 4000);
        assert_eq!(c.status(), ContainerStatus::Ready);
    }

    #[test]
    fn recompute_saturates_on_oversized_records() {
        let mut c = Container::new(8, ContainerClass::Small);
        c.load_records = vec![record("ORD-1", u32::MAX), record("ORD-2", u32::MAX)];
        c.recompute();
        assert_eq!(c.current_load(), u32::MAX);
        assert_eq!(c.free_capacity(), 0);
        assert!(!assertions::container_is_consistent(&c));
    }

    #[test]
    fn class_parsing_is_case_insensitive() {
        assert_eq!("large".parse::<ContainerClass>(), Ok(ContainerClass::Large));
        assert_eq!(" Small ".parse::<ContainerClass>(), Ok(ContainerClass::Small));
        assert!("huge".parse::<ContainerClass>().is_err());
    }
}
