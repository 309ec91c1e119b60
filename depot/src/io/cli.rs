use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use freight_rs::entities::{ContainerClass, ShipmentStatus};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the persisted depot state
    #[arg(short, long, value_name = "FOLDER", default_value = "depot-state")]
    pub store_dir: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Initial depot (containers, fleet, inventory), only used for state not yet in the store
    #[arg(short, long, value_name = "FILE")]
    pub instance_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Quote a shipment and confirm it
    Ship(ShipArgs),
    /// Move a shipment to a later status
    Status {
        order_id: String,
        #[arg(value_name = "[pending, ready, in-transit, delivered]")]
        status: ShipmentStatus,
    },
    /// Place all pending shipments into containers (First-Fit Decreasing)
    Optimize,
    /// Show a shipment and its tracking stage
    Track { order_id: String },
    /// Add stock to an inventory category
    Restock { category: String, quantity: i64 },
    /// Operational summary of the depot
    Report,
    /// Income statement over all shipments
    Financials,
    /// Submit randomly generated shipment requests, then optimize
    Demo {
        #[arg(short, long)]
        n_orders: Option<usize>,
    },
}

#[derive(Args, Debug)]
pub struct ShipArgs {
    #[arg(long)]
    pub customer: String,
    #[arg(long)]
    pub product: String,
    #[arg(long)]
    pub category: String,
    /// Weight in kg
    #[arg(long, allow_hyphen_values = true)]
    pub weight: i64,
    #[arg(long, value_name = "[small, medium, large]")]
    pub class: ContainerClass,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub country: String,
    /// Only print the quote, without confirming it
    #[arg(long)]
    pub quote_only: bool,
}
