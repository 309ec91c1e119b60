mod depot;
mod fleet;
mod ledger;
mod order_id;
mod shared;
mod yard;

#[doc(inline)]
pub use depot::Depot;
#[doc(inline)]
pub use depot::OptimizeOutcome;
#[doc(inline)]
pub use depot::ShipmentRequest;
#[doc(inline)]
pub use fleet::Dispatch;
#[doc(inline)]
pub use fleet::Fleet;
#[doc(inline)]
pub use ledger::InventoryLedger;
#[doc(inline)]
pub use order_id::OrderIdGenerator;
#[doc(inline)]
pub use shared::SharedDepot;
#[doc(inline)]
pub use yard::ContainerYard;
