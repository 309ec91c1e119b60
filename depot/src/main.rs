use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use depot::config::DepotConfig;
use depot::demo;
use depot::io;
use depot::io::cli::{Cli, Command, ShipArgs};
use freight_rs::engine::{Depot, SharedDepot};
use freight_rs::entities::{DepotInstance, ShipmentForm};
use freight_rs::routing::{GeoRouter, StaticGeocoder};
use freight_rs::storage::JsonFileStore;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: DepotConfig = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            DepotConfig::default()
        }
        Some(config_file) => io::read_json(config_file).context("incorrect config file format")?,
    };
    info!("[MAIN] Successfully parsed DepotConfig: {config:?}");

    let instance = match &args.instance_file {
        None => DepotInstance::default(),
        Some(instance_file) => read_instance(instance_file)?,
    };

    let store = JsonFileStore::open(&args.store_dir)
        .with_context(|| format!("could not open store at {}", args.store_dir.display()))?;
    let lifecycle = match args.command {
        Command::Demo { .. } => demo::demo_lifecycle(config.lifecycle),
        _ => config.lifecycle,
    };
    let mut depot = Depot::open(instance, Box::new(store), lifecycle);
    let router = GeoRouter::new(StaticGeocoder::with_defaults(), config.router.clone());

    match args.command {
        Command::Ship(ship_args) => {
            let quote_only = ship_args.quote_only;
            let quote = depot.submit_shipment(&form(ship_args), &router).await?;
            match quote_only {
                true => print(&quote),
                false => print(&depot.confirm_shipment(&quote.order_id)?),
            }
        }
        Command::Status { order_id, status } => {
            print(&depot.set_shipment_status(&order_id, status)?)
        }
        Command::Optimize => print(&depot.optimize_containers()),
        Command::Track { order_id } => {
            let shipment = depot.track_shipment(&order_id)?;
            info!(
                "[MAIN] {order_id}: stage {}/4, {}",
                shipment.status.tracking_stage(),
                shipment.status.tracking_label()
            );
            print(shipment)
        }
        Command::Restock { category, quantity } => {
            let on_hand = depot.restock(&category, quantity)?;
            info!("[MAIN] {category}: {on_hand} kg on hand");
            print(depot.ledger())
        }
        Command::Report => print(&depot.report()),
        Command::Financials => print(&depot.financials()),
        Command::Demo { n_orders } => {
            let mut rng = match config.prng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            let forms = demo::generate_forms(&mut rng, n_orders.unwrap_or(config.n_demo_orders));
            let summary = demo::run_demo(SharedDepot::new(depot), Arc::new(router), forms).await;
            print(&summary)
        }
    }
}

fn read_instance(path: &Path) -> Result<DepotInstance> {
    let instance: DepotInstance = io::read_json(path)?;
    instance
        .validate()
        .with_context(|| format!("invalid instance: {}", path.display()))?;
    Ok(instance)
}

fn form(args: ShipArgs) -> ShipmentForm {
    ShipmentForm {
        customer_name: args.customer,
        product_name: args.product,
        category: args.category,
        weight: args.weight,
        container_class: args.class,
        destination_city: args.city,
        destination_country: args.country,
    }
}

fn print(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
