use serde::Serialize;

use crate::engine::{ContainerYard, Fleet, InventoryLedger};
use crate::entities::{ContainerStatus, Shipment, ShipmentStatus, Vehicle};

pub const TAX_RATE: f64 = 0.20;

/// Vehicle whose costs are used to estimate the expenses of road legs
pub const REFERENCE_TRUCK: &str = "RoadKing";

/// Vehicle whose costs are used to estimate the expenses of sea legs
pub const REFERENCE_SHIP: &str = "BlueSea";

/// Income statement over all shipments.
/// Expenses are estimated per shipment with the costs of a single reference truck and ship.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Financials {
    pub revenue: u64,
    pub expenses: u64,
    pub net_income: i64,
    /// Negative when the net income is, a loss is carried as a tax credit
    pub tax: f64,
    pub profit_after_tax: f64,
}

impl Financials {
    pub fn compute(shipments: &[Shipment], fleet: &Fleet) -> Self {
        let truck = reference_vehicle(&fleet.trucks, REFERENCE_TRUCK);
        let ship = reference_vehicle(&fleet.ships, REFERENCE_SHIP);

        let revenue = shipments.iter().map(|s| s.price).sum::<u64>();
        let expenses = shipments
            .iter()
            .map(|s| {
                let road = truck.map_or(0, |t| t.trip_cost(s.domestic_truck_km));
                let sea = match s.has_sea_leg() {
                    true => ship.map_or(0, |sh| sh.trip_cost(s.sea_km)),
                    false => 0,
                };
                road + sea
            })
            .sum::<u64>();

        let net_income = revenue as i64 - expenses as i64;
        let tax = net_income as f64 * TAX_RATE;
        Self {
            revenue,
            expenses,
            net_income,
            tax,
            profit_after_tax: net_income as f64 - tax,
        }
    }
}

fn reference_vehicle<'a>(pool: &'a [Vehicle], name: &str) -> Option<&'a Vehicle> {
    pool.iter().find(|v| v.name == name).or_else(|| pool.first())
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StockLevel {
    pub category: String,
    pub quantity: u64,
    pub low: bool,
}

/// Operational summary of the depot
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Report {
    pub total_shipments: usize,
    pub completed_shipments: usize,
    /// Revenue of delivered shipments only
    pub delivered_revenue: u64,
    pub total_distance_km: u64,
    /// Destination with the most shipments, ties go to the destination seen last
    pub most_popular_destination: Option<String>,
    /// Total load over total capacity of all containers, in percent
    pub utilization_pct: f64,
    pub n_containers: usize,
    pub n_ready_containers: usize,
    /// Shipped weight per category in kg, in order of first appearance
    pub weight_per_category: Vec<(String, u64)>,
    pub inventory: Vec<StockLevel>,
}

impl Report {
    pub fn compute(shipments: &[Shipment], yard: &ContainerYard, ledger: &InventoryLedger) -> Self {
        let completed = shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Delivered);

        Self {
            total_shipments: shipments.len(),
            completed_shipments: completed.clone().count(),
            delivered_revenue: completed.map(|s| s.price).sum(),
            total_distance_km: shipments.iter().map(|s| s.distance as u64).sum(),
            most_popular_destination: most_popular_destination(shipments),
            utilization_pct: yard.utilization() * 100.0,
            n_containers: yard.containers().len(),
            n_ready_containers: yard
                .containers()
                .iter()
                .filter(|c| c.status() == ContainerStatus::Ready)
                .count(),
            weight_per_category: tally(shipments.iter().map(|s| (&s.category, s.weight as u64))),
            inventory: ledger
                .items()
                .iter()
                .map(|i| StockLevel {
                    category: i.category.clone(),
                    quantity: i.quantity,
                    low: i.is_low(),
                })
                .collect(),
        }
    }
}

fn most_popular_destination(shipments: &[Shipment]) -> Option<String> {
    tally(shipments.iter().map(|s| (&s.destination, 1)))
        .into_iter()
        .reduce(|best, next| match next.1 >= best.1 {
            true => next,
            false => best,
        })
        .map(|(destination, _)| destination)
}

/// Sums values per key, keeping keys in order of first appearance
fn tally<'a>(entries: impl Iterator<Item = (&'a String, u64)>) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = vec![];
    for (key, value) in entries {
        match totals.iter_mut().find(|(k, _)| k == key) {
            Some((_, total)) => *total += value,
            None => totals.push((key.clone(), value)),
        }
    }
    totals
}
