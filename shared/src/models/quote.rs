//! Quote model
//!
//! A vendor's priced response to one RFQ. At most one quote per RFQ ends up
//! `accepted`; acceptance rejects every sibling still pending and closes the
//! owning RFQ (all server-side, the client only observes it on refresh).

use serde::{Deserialize, Serialize};

/// Quote lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    /// Legal transition table. Accepted/rejected quotes are immutable,
    /// expiry only takes a pending quote.
    pub fn can_transition(self, next: QuoteStatus) -> bool {
        use QuoteStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Expired)
        )
    }

    /// Whether the buyer may still decide on this quote.
    pub fn is_decidable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Quote entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub rfq_id: String,
    pub vendor_id: String,
    pub price: f64,
    /// ISO 4217 code, e.g. "USD"
    pub currency: String,
    /// Free text or a duration band, e.g. "1 week"
    pub delivery_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub valid_until: Option<String>,
    pub created_at: Option<String>,
}

/// Vendor-supplied fields for `POST /api/quotes`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDraft {
    pub rfq_id: String,
    pub vendor_id: String,
    pub price: f64,
    pub currency: String,
    pub delivery_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_status_legal_edges() {
        use QuoteStatus::*;
        assert!(Pending.can_transition(Accepted));
        assert!(Pending.can_transition(Rejected));
        assert!(Pending.can_transition(Expired));
    }

    #[test]
    fn test_decided_quotes_are_immutable() {
        use QuoteStatus::*;
        for next in [Pending, Accepted, Rejected, Expired] {
            assert!(!Accepted.can_transition(next));
            assert!(!Rejected.can_transition(next));
            assert!(!Expired.can_transition(next));
        }
    }

    #[test]
    fn test_only_pending_is_decidable() {
        assert!(QuoteStatus::Pending.is_decidable());
        assert!(!QuoteStatus::Accepted.is_decidable());
        assert!(!QuoteStatus::Expired.is_decidable());
    }

    #[test]
    fn test_quote_wire_roundtrip() {
        let json = r#"{
            "id": "q1",
            "rfq_id": "r1",
            "vendor_id": "v1",
            "price": 24.5,
            "currency": "USD",
            "delivery_time": "1 week",
            "status": "pending",
            "created_at": "2026-01-11T09:30:00"
        }"#;
        let q: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(q.status, QuoteStatus::Pending);
        assert_eq!(q.price, 24.5);
        assert!(q.notes.is_none());
    }
}
