//! Cart model
//!
//! Buyer-scoped mutable collection of line items prior to checkout. Every
//! cart endpoint returns the full updated cart, which replaces the local
//! cache wholesale.

use serde::{Deserialize, Serialize};

/// Cart line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// The cart-item id (not the product id)
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub product_name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Cart entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Server-derived sum of price * quantity over items
    pub total_price: f64,
}

impl Cart {
    /// Total number of units across all line items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart {
            id: "c1".to_string(),
            items: vec![
                CartItem {
                    id: "i1".to_string(),
                    product_id: "p1".to_string(),
                    quantity: 2,
                    product_name: "Bearing".to_string(),
                    price: 10.0,
                    image_url: None,
                },
                CartItem {
                    id: "i2".to_string(),
                    product_id: "p2".to_string(),
                    quantity: 1,
                    product_name: "Seal".to_string(),
                    price: 5.0,
                    image_url: None,
                },
            ],
            total_price: 25.0,
        };
        assert_eq!(cart.item_count(), 3);
        assert!(!cart.is_empty());
    }
}
