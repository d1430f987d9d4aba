//! Inquiry chat message model
//!
//! Append-only thread entries tied to an inquiry. Ordering is defined by
//! the server-assigned `created_at`; nothing is ever edited or deleted
//! besides the recipient-side `read` flag.

use serde::{Deserialize, Serialize};

/// Which side of the negotiation sent the message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Buyer,
    Vendor,
}

/// Chat message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub inquiry_id: String,
    pub sender_id: String,
    pub sender_role: SenderRole,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: Option<String>,
}

/// Payload for `POST /api/chat/message`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageDraft {
    pub inquiry_id: String,
    pub sender_id: String,
    pub sender_role: SenderRole,
    pub content: String,
}
