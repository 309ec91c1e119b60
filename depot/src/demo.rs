use std::sync::Arc;

use freight_rs::FreightError;
use freight_rs::engine::{OptimizeOutcome, SharedDepot};
use freight_rs::entities::{ContainerClass, ShipmentForm};
use freight_rs::routing::DistanceProvider;
use freight_rs::util::{LifecycleConfig, OrderIdScheme};
use itertools::Itertools;
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use thousands::Separable;
use tokio::task::JoinSet;

const CUSTOMERS: &[&str] = &[
    "Anatolia Foods",
    "Berliner Frische",
    "Cote d'Azur Traiteur",
    "Thames Grocers",
    "Via Roma Mercato",
    "Aegean Deli",
];

/// (product, category)
const PRODUCTS: &[(&str, &str)] = &[
    ("Blueberries", "Fresh"),
    ("Strawberries", "Fresh"),
    ("Frozen Blueberries", "Frozen"),
    ("Frozen Mixed Berries", "Frozen"),
    ("Organic Blueberries", "Organic"),
    ("Organic Raspberries", "Organic"),
];

/// (city, country)
const DESTINATIONS: &[(&str, &str)] = &[
    ("Ankara", "Turkey"),
    ("Istanbul", "Turkey"),
    ("Berlin", "Germany"),
    ("Paris", "France"),
    ("London", "UK"),
    ("Rome", "Italy"),
    ("Vienna", "Austria"),
    ("Athens", "Greece"),
    ("Lisbon", "Portugal"),
];

/// Generates `n` shipment requests.
/// Weights lie between 1 kg and half the capacity of the requested container class.
pub fn generate_forms(rng: &mut impl Rng, n: usize) -> Vec<ShipmentForm> {
    (0..n)
        .map(|_| {
            let class = *ContainerClass::ALL.choose(rng).unwrap_or(&ContainerClass::Medium);
            let (product, category) = *PRODUCTS.choose(rng).unwrap_or(&PRODUCTS[0]);
            let (city, country) = *DESTINATIONS.choose(rng).unwrap_or(&DESTINATIONS[0]);
            ShipmentForm {
                customer_name: CUSTOMERS.choose(rng).unwrap_or(&CUSTOMERS[0]).to_string(),
                product_name: product.to_string(),
                category: category.to_string(),
                weight: rng.random_range(1..=(class.capacity() / 2) as i64),
                container_class: class,
                destination_city: city.to_string(),
                destination_country: country.to_string(),
            }
        })
        .collect()
}

/// Lifecycle configuration of a demo run.
/// Requests are submitted concurrently and can share a millisecond, so order ids are always sequential.
pub fn demo_lifecycle(lifecycle: LifecycleConfig) -> LifecycleConfig {
    if lifecycle.order_ids != OrderIdScheme::Sequential {
        info!("[DEMO] using sequential order ids instead of {:?}", lifecycle.order_ids);
    }
    LifecycleConfig {
        order_ids: OrderIdScheme::Sequential,
        ..lifecycle
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DemoSummary {
    pub n_requests: usize,
    pub confirmed: Vec<String>,
    /// Rejection reason per request that could not be confirmed
    pub rejected: Vec<String>,
    pub confirmed_weight: u64,
    pub optimization: OptimizeOutcome,
}

/// Submits and confirms all `forms` concurrently, then runs an optimization pass.
pub async fn run_demo<P>(depot: SharedDepot, provider: Arc<P>, forms: Vec<ShipmentForm>) -> DemoSummary
where
    P: DistanceProvider + Send + Sync + 'static,
{
    let mut summary = DemoSummary {
        n_requests: forms.len(),
        ..DemoSummary::default()
    };

    let mut tasks = JoinSet::new();
    for form in forms {
        let depot = depot.clone();
        let provider = provider.clone();
        tasks.spawn(async move {
            let quote = depot.submit_shipment(&form, provider.as_ref()).await?;
            depot.confirm_shipment(&quote.order_id)
        });
    }

    let results: Vec<Result<_, FreightError>> = tasks
        .join_all()
        .await;
    for result in results {
        match result {
            Ok(shipment) => {
                debug!("[DEMO] {} confirmed ({})", shipment.order_id, shipment.status);
                summary.confirmed_weight += shipment.weight as u64;
                summary.confirmed.push(shipment.order_id);
            }
            Err(e) => {
                debug!("[DEMO] request rejected: {e}");
                summary.rejected.push(e.to_string());
            }
        }
    }
    summary.confirmed.sort();
    summary.optimization = depot.optimize_containers();

    info!(
        "[DEMO] {}/{} requests confirmed, {} kg booked, {} placed by optimization, {} in backlog",
        summary.confirmed.len(),
        summary.n_requests,
        summary.confirmed_weight.separate_with_commas(),
        summary.optimization.placed,
        summary.optimization.backlog.len()
    );
    let reasons = summary.rejected.iter().counts();
    for (reason, count) in reasons.iter().sorted() {
        info!("[DEMO] {count}x {reason}");
    }

    summary
}
