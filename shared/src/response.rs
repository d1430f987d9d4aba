//! API response envelopes
//!
//! The backend wraps list endpoints in named envelopes (`{"rfqs": [...]}`)
//! and reports failures as `{"detail": "..."}`. Mutation endpoints return a
//! small acknowledgement rather than the full entity.

use serde::Deserialize;

use crate::models::{Message, Order, Quote, Rfq};

/// Error body attached to 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// `GET /api/rfqs` envelope
#[derive(Debug, Deserialize)]
pub struct RfqList {
    pub rfqs: Vec<Rfq>,
}

/// `GET /api/quotes` envelope
#[derive(Debug, Deserialize)]
pub struct QuoteList {
    pub quotes: Vec<Quote>,
}

/// `GET /api/orders` envelope
#[derive(Debug, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

/// `GET /api/chat/history/{inquiry_id}` returns a bare array.
pub type MessageHistory = Vec<Message>;

/// Acknowledgement for entity creation (`POST /api/rfqs`, `POST /api/quotes`).
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement for entity updates (`PUT /api/rfqs/{id}`, quote
/// decisions, order fulfilment updates).
#[derive(Debug, Clone, Deserialize)]
pub struct Updated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelopes_deserialize() {
        let body = r#"{"rfqs": []}"#;
        let list: RfqList = serde_json::from_str(body).unwrap();
        assert!(list.rfqs.is_empty());

        let body = r#"{"quotes": []}"#;
        let list: QuoteList = serde_json::from_str(body).unwrap();
        assert!(list.quotes.is_empty());
    }

    #[test]
    fn test_error_body_detail() {
        let err: ErrorBody = serde_json::from_str(r#"{"detail": "RFQ not found"}"#).unwrap();
        assert_eq!(err.detail, "RFQ not found");
    }

    #[test]
    fn test_created_ack() {
        let ack: Created =
            serde_json::from_str(r#"{"id": "r1", "status": "open", "message": "RFQ created successfully"}"#)
                .unwrap();
        assert_eq!(ack.id, "r1");
        assert_eq!(ack.status, "open");
    }
}
