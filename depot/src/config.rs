use serde::{Deserialize, Serialize};

use freight_rs::util::{LifecycleConfig, RouterConfig};

/// Configuration of the depot binary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DepotConfig {
    /// Behaviour of confirmations, optimization passes and order ids
    pub lifecycle: LifecycleConfig,
    /// Ports, distance factors and geocoding timeout of the distance provider
    pub router: RouterConfig,
    /// Seed for the PRNG of the demo generator. If undefined, the generator uses entropy
    pub prng_seed: Option<u64>,
    /// Number of shipment requests generated by `depot demo` unless overridden on the command line
    pub n_demo_orders: usize,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleConfig::default(),
            router: RouterConfig::default(),
            prng_seed: None,
            n_demo_orders: 20,
        }
    }
}
