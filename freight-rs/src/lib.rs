//! Container-loading and fleet-assignment engine of a small freight depot.
//!
//! Shipments are quoted, confirmed, packed into a fixed set of containers (First-Fit Decreasing)
//! and serviced by a fixed fleet of trucks and ships, while the aggregate load and capacity
//! invariants are kept consistent as shipments move through their lifecycle.

/// Shipments, containers, vehicles, inventory and the initial depot instance
pub mod entities;

/// Container allocator, fleet dispatcher, inventory ledger and the shipment lifecycle manager
pub mod engine;

/// Route decomposition into road and sea legs, with a geocoding and a table-based provider
pub mod routing;

/// Pure pricing and delivery-date estimation
pub mod pricing;

/// Key-value persistence of the depot state
pub mod storage;

/// Financial statements and operational reports derived from the depot state
pub mod reporting;

/// Configuration and invariant checks
pub mod util;

mod error;

#[doc(inline)]
pub use error::FreightError;
