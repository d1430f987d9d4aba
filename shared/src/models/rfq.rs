//! RFQ model
//!
//! A buyer's request for quotation. Status moves along
//! `open -> quoted -> closed`, with `open -> closed` (direct acceptance of
//! the first quote) and `open -> cancelled` (buyer withdrawal) as the only
//! other edges. Closed/cancelled are terminal; `quoted` keeps accepting
//! further quotes until the RFQ closes.

use serde::{Deserialize, Serialize};

/// RFQ lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RfqStatus {
    #[default]
    Open,
    Quoted,
    Closed,
    Cancelled,
}

impl RfqStatus {
    /// Legal transition table. Anything not listed here is a bug on the
    /// caller's side (the backend is authoritative; the client only uses
    /// this to reject impossible local state).
    pub fn can_transition(self, next: RfqStatus) -> bool {
        use RfqStatus::*;
        matches!(
            (self, next),
            (Open, Quoted) | (Open, Closed) | (Open, Cancelled) | (Quoted, Closed)
        )
    }

    /// Whether vendors may still submit quotes against this RFQ.
    pub fn accepts_quotes(self) -> bool {
        matches!(self, Self::Open | Self::Quoted)
    }

    /// Whether the owning buyer may still edit RFQ fields.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// RFQ entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    pub id: String,
    pub buyer_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub part_description: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub requirements: Option<String>,
    /// Attachment URIs
    #[serde(default)]
    pub attachments: Vec<String>,
    pub status: RfqStatus,
    pub created_at: Option<String>,
}

/// Fields the buyer supplies when creating an RFQ.
///
/// Posted form-encoded to `POST /api/rfqs`.
#[derive(Debug, Clone, Serialize)]
pub struct RfqDraft {
    pub title: String,
    pub description: String,
    pub part_description: Option<String>,
    pub quantity: i64,
    pub buyer_id: String,
    pub target_price: Option<f64>,
    pub requirements: Option<String>,
}

/// Partial update for an open RFQ (`PUT /api/rfqs/{id}`).
///
/// Only fields the owning buyer may edit while the RFQ is open.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RfqPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

impl RfqPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.part_description.is_none()
            && self.quantity.is_none()
            && self.target_price.is_none()
            && self.requirements.is_none()
    }
}
