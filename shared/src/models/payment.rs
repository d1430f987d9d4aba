//! Payment wire types
//!
//! Provider-facing payloads for the create-intent / create-order / capture
//! endpoints, plus the persisted payment record exposed by
//! `GET /api/payments/{id}`.

use serde::{Deserialize, Serialize};

/// Supported payment providers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Paypal,
}

impl std::fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stripe => f.write_str("stripe"),
            Self::Paypal => f.write_str("paypal"),
        }
    }
}

/// Response of `POST /api/payments/stripe/create-intent`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeIntentCreated {
    pub client_secret: String,
    pub payment_intent_id: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Response of `POST /api/payments/paypal/create-order`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalOrderCreated {
    pub paypal_order_id: String,
    #[serde(default)]
    pub approval_url: Option<String>,
}

/// Response of `POST /api/payments/paypal/capture`.
///
/// Anything other than `COMPLETED` maps to a failed attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureResult {
    pub status: String,
}

impl CaptureResult {
    pub const COMPLETED: &'static str = "COMPLETED";

    pub fn is_completed(&self) -> bool {
        self.status == Self::COMPLETED
    }
}

/// Persisted payment record (`GET /api/payments/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub provider: PaymentProvider,
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_status_mapping() {
        let done: CaptureResult = serde_json::from_str(r#"{"status": "COMPLETED"}"#).unwrap();
        assert!(done.is_completed());
        let pending: CaptureResult =
            serde_json::from_str(r#"{"status": "PENDING_REVIEW"}"#).unwrap();
        assert!(!pending.is_completed());
    }

    #[test]
    fn test_provider_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentProvider::Paypal).unwrap(),
            "\"paypal\""
        );
        let p: PaymentProvider = serde_json::from_str("\"stripe\"").unwrap();
        assert_eq!(p, PaymentProvider::Stripe);
    }
}
