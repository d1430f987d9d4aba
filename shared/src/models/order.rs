//! Order model
//!
//! The materialized commitment produced by quote acceptance or cart
//! checkout. `total_amount` is fixed at creation time from the items and is
//! never recomputed from later prices.

use serde::{Deserialize, Serialize};

/// Fulfilment status, mutated by vendor/admin only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment status as persisted on the order record, mutated by the payment
/// orchestrator only. Distinct from the per-attempt state machine in
/// `procura-client`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    #[default]
    Idle,
    Processing,
    Succeeded,
    Failed,
}

/// How the order came to exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    RfqQuote,
    CartCheckout,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_ref: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    /// None for multi-vendor cart orders
    #[serde(default)]
    pub vendor_id: Option<String>,
    pub source: OrderSource,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub payment_status: PaymentState,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Vendor/admin fulfilment update (`PUT /api/orders/{id}`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_backend_shape() {
        let json = r#"{
            "id": "o1",
            "buyer_id": "b1",
            "vendor_id": "v1",
            "source": "rfq_quote",
            "items": [{"product_ref": "part-6204", "quantity": 50, "unit_price": 24.5}],
            "total_amount": 1225.0,
            "currency": "USD",
            "status": "pending",
            "payment_status": "idle",
            "created_at": "2026-01-12T08:00:00"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.source, OrderSource::RfqQuote);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentState::Idle);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_multi_vendor_order_has_no_vendor() {
        let json = r#"{
            "id": "o2",
            "buyer_id": "b1",
            "source": "cart_checkout",
            "total_amount": 25.0,
            "currency": "USD",
            "status": "pending",
            "payment_status": "idle",
            "created_at": null
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.vendor_id.is_none());
        assert_eq!(order.source, OrderSource::CartCheckout);
    }
}
