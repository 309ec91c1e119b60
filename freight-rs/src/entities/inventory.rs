use serde::{Deserialize, Serialize};

/// Stock of a product category, in kg
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InventoryItem {
    pub category: String,
    pub quantity: u64,
    /// Below this quantity the category needs restocking
    pub min_stock: u64,
}

impl InventoryItem {
    pub fn new(category: &str, quantity: u64, min_stock: u64) -> Self {
        Self {
            category: category.to_string(),
            quantity,
            min_stock,
        }
    }

    pub fn is_low(&self) -> bool {
        self.quantity < self.min_stock
    }
}
