use crate::entities::ShipmentStatus;
use thiserror::Error;

/// Errors reported to the caller of a depot operation.
/// Every variant aborts only the current operation and leaves no partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FreightError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("inventory error: {0}")]
    Inventory(String),
    #[error("capacity error: {0}")]
    Capacity(String),
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: ShipmentStatus,
        to: ShipmentStatus,
    },
    #[error("order id {0} was generated twice, retry the request")]
    DuplicateOrderId(String),
}
