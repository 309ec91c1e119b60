use std::cmp::Reverse;
use std::collections::HashSet;

use itertools::Itertools;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::FreightError;
use crate::engine::{ContainerYard, Fleet, InventoryLedger, OrderIdGenerator};
use crate::entities::{
    ContainerClass, ContainerId, DepotInstance, LoadRecord, Shipment, ShipmentForm,
    ShipmentStatus,
};
use crate::pricing;
use crate::reporting::{Financials, Report};
use crate::routing::{DistanceProvider, Route};
use crate::storage::{KvStore, MemoryStore, Storage, keys};
use crate::util::{LifecycleConfig, assertions};

/// A validated shipment request, ready to be routed and quoted
#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentRequest {
    pub customer_name: String,
    pub product_name: String,
    pub category: String,
    pub weight: u32,
    pub container_class: ContainerClass,
    pub destination: String,
}

/// Result of an optimization pass
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OptimizeOutcome {
    /// Number of shipments placed into a container
    pub placed: usize,
    /// Pending shipments for which no container had enough room
    pub backlog: Vec<String>,
}

/// Shipment lifecycle manager.
/// Owns the container yard, the fleet, the inventory ledger and all shipments,
/// and persists them to its [`Storage`] after every mutation.
pub struct Depot {
    origin: String,
    yard: ContainerYard,
    fleet: Fleet,
    ledger: InventoryLedger,
    shipments: Vec<Shipment>,
    /// Quotes handed out by [`Depot::submit_shipment`] awaiting confirmation, never persisted
    quotes: Vec<Shipment>,
    storage: Storage,
    config: LifecycleConfig,
    order_ids: OrderIdGenerator,
}

impl Depot {
    /// Opens a depot on top of `store`.
    /// Every state key absent from the store is initialized from `instance` and written back.
    pub fn open(
        instance: DepotInstance,
        store: Box<dyn KvStore + Send>,
        config: LifecycleConfig,
    ) -> Self {
        let mut storage = Storage::new(store);
        let DepotInstance {
            origin,
            containers,
            trucks,
            ships,
            inventory,
        } = instance;

        let mut yard = load_or_init(&mut storage, keys::CONTAINERS, || {
            ContainerYard::new(containers)
        });
        let fleet = load_or_init(&mut storage, keys::FLEET, || Fleet::new(trucks, ships));
        let ledger = load_or_init(&mut storage, keys::INVENTORY, || {
            InventoryLedger::new(inventory)
        });
        let shipments: Vec<Shipment> = load_or_init(&mut storage, keys::SHIPMENTS, Vec::new);

        //stored loads and statuses are derived data, never trust them
        yard.recompute_all();

        let order_ids =
            OrderIdGenerator::new(config.order_ids, shipments.iter().map(|s| s.order_id.as_str()));

        info!(
            "[DEPOT] opened at {origin}: {} containers, {} vehicles, {} shipments",
            yard.containers().len(),
            fleet.vehicles().count(),
            shipments.len()
        );

        let mut depot = Self {
            origin,
            yard,
            fleet,
            ledger,
            shipments,
            quotes: vec![],
            storage,
            config,
            order_ids,
        };
        depot.reconcile();
        depot
    }

    /// Drops load records and frees vehicles which reference unknown or delivered shipments.
    /// The keys are written separately, so a store can hold a container or fleet snapshot
    /// that is older than its shipments.
    fn reconcile(&mut self) {
        let live: HashSet<&str> = self
            .shipments
            .iter()
            .filter(|s| s.status != ShipmentStatus::Delivered)
            .map(|s| s.order_id.as_str())
            .collect();
        let n_records = self.yard.reconcile(&live);
        let n_vehicles = self.fleet.release_stale(&live);

        if n_records + n_vehicles > 0 {
            warn!(
                "[DEPOT] stored state was inconsistent, dropped {n_records} load records and freed {n_vehicles} vehicles"
            );
            self.persist();
        }
        debug_assert!(assertions::depot_is_consistent(&self.shipments, &self.yard, &self.fleet));
    }

    /// Depot backed by a fresh in-memory store
    pub fn in_memory(instance: DepotInstance, config: LifecycleConfig) -> Self {
        Self::open(instance, Box::new(MemoryStore::new()), config)
    }

    /// Validates, checks and quotes a shipment request.
    /// The quote is staged until [`Depot::confirm_shipment`] or [`Depot::cancel_quote`],
    /// neither the inventory nor the containers are touched.
    pub async fn submit_shipment<P: DistanceProvider>(
        &mut self,
        form: &ShipmentForm,
        provider: &P,
    ) -> Result<Shipment, FreightError> {
        let request = self.precheck(form)?;
        let route = provider.route(&self.origin, &request.destination).await;
        self.stage_quote(request, route)
    }

    /// Validates the form and checks inventory and container capacity for it.
    pub fn precheck(&self, form: &ShipmentForm) -> Result<ShipmentRequest, FreightError> {
        let request = validate(form)?;
        self.ledger.check(&request.category, request.weight as u64)?;
        self.yard
            .check_capacity(request.container_class, request.weight)?;
        Ok(request)
    }

    /// Prices a checked request over `route` and stages the resulting quote.
    /// Inventory and capacity are checked again, the depot may have changed since [`Depot::precheck`].
    pub fn stage_quote(
        &mut self,
        request: ShipmentRequest,
        route: Route,
    ) -> Result<Shipment, FreightError> {
        self.ledger.check(&request.category, request.weight as u64)?;
        self.yard
            .check_capacity(request.container_class, request.weight)?;

        let order_id = self.order_ids.next_id();
        if self.find(&order_id).is_some() || self.quote_idx(&order_id).is_some() {
            warn!("[DEPOT] order id {order_id} already in use");
            return Err(FreightError::DuplicateOrderId(order_id));
        }

        let created_at = Timestamp::now();
        let departure = created_at.to_zoned(TimeZone::system()).date();
        let quote = Shipment {
            order_id,
            customer_name: request.customer_name,
            product_name: request.product_name,
            category: request.category,
            weight: request.weight,
            container_class: request.container_class,
            destination: request.destination,
            distance: route.total_km,
            domestic_truck_km: route.domestic_km,
            sea_km: route.sea_km,
            origin_port: route.origin_port,
            price: pricing::price(route.total_km, request.container_class),
            delivery_date: pricing::estimate_delivery_date(route.total_km, departure),
            created_at,
            status: ShipmentStatus::Pending,
            container_id: None,
            truck: None,
            ship: None,
        };
        info!(
            "[DEPOT] quoted {}: {} kg {} to {} ({} km), price {}",
            quote.order_id,
            quote.weight,
            quote.container_class,
            quote.destination,
            quote.distance,
            quote.price
        );
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Turns a staged quote into a shipment.
    /// Inventory and capacity are re-checked first, a failed check leaves the quote staged
    /// and nothing reserved or persisted.
    pub fn confirm_shipment(&mut self, order_id: &str) -> Result<Shipment, FreightError> {
        let idx = self
            .quote_idx(order_id)
            .ok_or_else(|| FreightError::NotFound(order_id.to_string()))?;
        let (category, weight, class) = {
            let q = &self.quotes[idx];
            (q.category.clone(), q.weight, q.container_class)
        };

        self.ledger.check(&category, weight as u64)?;
        let container_id = self.yard.check_capacity(class, weight)?;

        let mut shipment = self.quotes[idx].clone();
        if self.config.place_on_confirm {
            load(&mut self.yard, &mut self.fleet, &mut shipment, container_id)?;
        }
        self.quotes.remove(idx);
        self.ledger.reserve(&category, weight as u64);

        info!(
            "[DEPOT] confirmed {} ({}), {} kg of {category} reserved",
            shipment.order_id, shipment.status, weight
        );
        self.shipments.push(shipment.clone());
        self.persist();

        debug_assert!(assertions::depot_is_consistent(&self.shipments, &self.yard, &self.fleet));
        Ok(shipment)
    }

    /// Discards a staged quote
    pub fn cancel_quote(&mut self, order_id: &str) -> Result<Shipment, FreightError> {
        let idx = self
            .quote_idx(order_id)
            .ok_or_else(|| FreightError::NotFound(order_id.to_string()))?;
        let quote = self.quotes.remove(idx);
        info!("[DEPOT] quote {order_id} cancelled");
        Ok(quote)
    }

    /// Moves a shipment forward in its lifecycle.
    /// Setting the current status again is a no-op.
    /// Moving into [`ShipmentStatus::Ready`] dispatches vehicles to the legs which have none yet,
    /// moving into [`ShipmentStatus::Delivered`] releases the container slot and the vehicles.
    pub fn set_shipment_status(
        &mut self,
        order_id: &str,
        status: ShipmentStatus,
    ) -> Result<Shipment, FreightError> {
        let idx = self
            .find(order_id)
            .ok_or_else(|| FreightError::NotFound(order_id.to_string()))?;
        let from = self.shipments[idx].status;

        if from == status {
            debug!("[DEPOT] {order_id} already {status}");
            return Ok(self.shipments[idx].clone());
        }
        if from.is_terminal() || status < from {
            return Err(FreightError::InvalidTransition {
                order_id: order_id.to_string(),
                from,
                to: status,
            });
        }

        let shipment = &mut self.shipments[idx];
        shipment.status = status;
        match status {
            ShipmentStatus::Ready => {
                self.fleet.assign(shipment);
            }
            ShipmentStatus::Delivered => {
                if let Some(container_id) = shipment.container_id {
                    self.yard.release(container_id, order_id);
                }
                self.fleet.release(order_id);
            }
            ShipmentStatus::Pending | ShipmentStatus::InTransit => {}
        }
        info!("[DEPOT] {order_id}: {from} -> {status}");
        let shipment = shipment.clone();
        self.persist();

        debug_assert!(assertions::depot_is_consistent(&self.shipments, &self.yard, &self.fleet));
        Ok(shipment)
    }

    /// First-Fit Decreasing pass over all pending shipments.
    /// Load records of delivered shipments are collected first. Every pending shipment, heaviest first,
    /// is placed into the first container with enough room (of its own class if
    /// [`LifecycleConfig::respect_container_class`]), becomes Ready and gets its vehicles dispatched.
    /// Shipments that fit nowhere stay Pending and are reported as backlog.
    pub fn optimize_containers(&mut self) -> OptimizeOutcome {
        let mut pending = self
            .shipments
            .iter()
            .positions(|s| s.status == ShipmentStatus::Pending)
            .collect_vec();
        if pending.is_empty() {
            info!("[DEPOT] no pending shipments to optimize");
            return OptimizeOutcome::default();
        }
        //stable: equal weights keep their creation order
        pending.sort_by_key(|&i| Reverse(self.shipments[i].weight));

        let delivered: HashSet<&str> = self
            .shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Delivered)
            .map(|s| s.order_id.as_str())
            .collect();
        self.yard.collect_delivered(&delivered);

        let mut outcome = OptimizeOutcome::default();
        for idx in pending {
            let s = &self.shipments[idx];
            let class = self.config.respect_container_class.then_some(s.container_class);
            let Some(container_id) = self.yard.first_fit(s.weight, class) else {
                debug!("[DEPOT] no container fits {} ({} kg)", s.order_id, s.weight);
                outcome.backlog.push(s.order_id.clone());
                continue;
            };
            let shipment = &mut self.shipments[idx];
            match load(&mut self.yard, &mut self.fleet, shipment, container_id) {
                Ok(()) => outcome.placed += 1,
                Err(e) => {
                    warn!("[DEPOT] could not place {}: {e}", shipment.order_id);
                    outcome.backlog.push(shipment.order_id.clone());
                }
            }
        }

        info!(
            "[DEPOT] optimization placed {} shipments, {} left pending, utilization {:.1}%",
            outcome.placed,
            outcome.backlog.len(),
            self.yard.utilization() * 100.0
        );
        self.persist();

        debug_assert!(assertions::depot_is_consistent(&self.shipments, &self.yard, &self.fleet));
        outcome
    }

    /// Shipment with `order_id`, its status determines the tracking stage
    pub fn track_shipment(&self, order_id: &str) -> Result<&Shipment, FreightError> {
        self.find(order_id)
            .map(|idx| &self.shipments[idx])
            .ok_or_else(|| FreightError::NotFound(order_id.to_string()))
    }

    /// Adds `qty` kg to the stock of `category`. Returns the new quantity on hand.
    pub fn restock(&mut self, category: &str, qty: i64) -> Result<u64, FreightError> {
        if qty <= 0 {
            return Err(FreightError::Validation(
                "restock quantity must be greater than 0".to_string(),
            ));
        }
        let on_hand = self.ledger.restock(category, qty as u64)?;
        self.persist();
        Ok(on_hand)
    }

    pub fn financials(&self) -> Financials {
        Financials::compute(&self.shipments, &self.fleet)
    }

    pub fn report(&self) -> Report {
        Report::compute(&self.shipments, &self.yard, &self.ledger)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn quotes(&self) -> &[Shipment] {
        &self.quotes
    }

    pub fn yard(&self) -> &ContainerYard {
        &self.yard
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    fn find(&self, order_id: &str) -> Option<usize> {
        self.shipments.iter().position(|s| s.order_id == order_id)
    }

    fn quote_idx(&self, order_id: &str) -> Option<usize> {
        self.quotes.iter().position(|q| q.order_id == order_id)
    }

    fn persist(&mut self) {
        let written = [
            self.storage.set(keys::SHIPMENTS, &self.shipments),
            self.storage.set(keys::CONTAINERS, &self.yard),
            self.storage.set(keys::FLEET, &self.fleet),
            self.storage.set(keys::INVENTORY, &self.ledger),
        ];
        if written.contains(&false) {
            warn!("[DEPOT] state only partially persisted, in-memory state remains authoritative");
        }
    }
}

/// Places `shipment` into `container_id`, marks it Ready and dispatches its vehicles.
/// The shipment is left untouched if the placement fails.
fn load(
    yard: &mut ContainerYard,
    fleet: &mut Fleet,
    shipment: &mut Shipment,
    container_id: ContainerId,
) -> Result<(), FreightError> {
    let record = LoadRecord {
        order_id: shipment.order_id.clone(),
        weight: shipment.weight,
        customer: shipment.customer_name.clone(),
    };
    yard.place(container_id, record)?;
    shipment.container_id = Some(container_id);
    shipment.status = ShipmentStatus::Ready;
    fleet.assign(shipment);
    Ok(())
}

fn load_or_init<T: Serialize + DeserializeOwned>(
    storage: &mut Storage,
    key: &str,
    init: impl FnOnce() -> T,
) -> T {
    match storage.load(key) {
        Some(value) => value,
        None => {
            debug!("[DEPOT] initializing {key} from the instance");
            let value = init();
            storage.set(key, &value);
            value
        }
    }
}

fn validate(form: &ShipmentForm) -> Result<ShipmentRequest, FreightError> {
    let required = [
        ("customer name", &form.customer_name),
        ("product name", &form.product_name),
        ("category", &form.category),
        ("destination city", &form.destination_city),
        ("destination country", &form.destination_country),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(FreightError::Validation(format!("{field} is required")));
    }

    let class = form.container_class;
    if form.weight <= 0 {
        return Err(FreightError::Validation(
            "weight must be greater than 0".to_string(),
        ));
    }
    if form.weight > class.capacity() as i64 {
        return Err(FreightError::Validation(format!(
            "weight exceeds {class} container capacity of {} kg",
            class.capacity()
        )));
    }
    let weight = form.weight as u32;

    Ok(ShipmentRequest {
        customer_name: form.customer_name.trim().to_string(),
        product_name: form.product_name.trim().to_string(),
        category: form.category.trim().to_string(),
        weight,
        container_class: class,
        destination: form.destination(),
    })
}
