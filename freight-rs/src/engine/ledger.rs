use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::FreightError;
use crate::entities::InventoryItem;

/// Stock on hand per product category.
/// Checking and reserving are separate steps, callers run [`InventoryLedger::check`] before [`InventoryLedger::reserve`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct InventoryLedger {
    items: Vec<InventoryItem>,
}

impl InventoryLedger {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn item(&self, category: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.category == category)
    }

    pub fn check(&self, category: &str, qty: u64) -> Result<(), FreightError> {
        let item = self
            .item(category)
            .ok_or_else(|| FreightError::Inventory(format!("category {category} not found")))?;
        match item.quantity >= qty {
            true => Ok(()),
            false => Err(FreightError::Inventory(format!(
                "insufficient stock of {category}, available: {} kg",
                item.quantity
            ))),
        }
    }

    /// Subtracts `qty` from the stock of `category`. Unknown categories are ignored.
    pub fn reserve(&mut self, category: &str, qty: u64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.category == category) {
            debug_assert!(item.quantity >= qty, "reserving more {category} than in stock");
            item.quantity = item.quantity.saturating_sub(qty);
            debug!("[LEDGER] reserved {qty} kg of {category}, {} kg left", item.quantity);
        }
    }

    /// Adds `qty` to the stock of `category`. Returns the new quantity on hand.
    pub fn restock(&mut self, category: &str, qty: u64) -> Result<u64, FreightError> {
        if qty == 0 {
            return Err(FreightError::Validation(
                "restock quantity must be greater than 0".to_string(),
            ));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.category == category)
            .ok_or_else(|| FreightError::Inventory(format!("category {category} not found")))?;
        item.quantity = item.quantity.checked_add(qty).ok_or_else(|| {
            FreightError::Validation(format!(
                "restocking {qty} kg would exceed the maximum stock of {category}"
            ))
        })?;
        info!("[LEDGER] restocked {qty} kg of {category}, {} kg on hand", item.quantity);
        Ok(item.quantity)
    }

    /// Items whose quantity dropped below their minimum stock
    pub fn low_stock(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|i| i.is_low())
    }
}
