mod container;
mod instance;
mod inventory;
mod shipment;
mod vehicle;

#[doc(inline)]
pub use container::Container;

#[doc(inline)]
pub use container::ContainerClass;

#[doc(inline)]
pub use container::ContainerId;

#[doc(inline)]
pub use container::ContainerStatus;

#[doc(inline)]
pub use container::LoadRecord;

#[doc(inline)]
pub use instance::DepotInstance;

#[doc(inline)]
pub use inventory::InventoryItem;

#[doc(inline)]
pub use shipment::Shipment;

#[doc(inline)]
pub use shipment::ShipmentForm;

#[doc(inline)]
pub use shipment::ShipmentStatus;

#[doc(inline)]
pub use shipment::VehicleRef;

#[doc(inline)]
pub use vehicle::Vehicle;

#[doc(inline)]
pub use vehicle::VehicleKind;

#[doc(inline)]
pub use vehicle::VehicleStatus;
