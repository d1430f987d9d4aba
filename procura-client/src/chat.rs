//! Negotiation chat channel
//!
//! Per-inquiry message thread, independent of quote state and gating
//! nothing. Messages are append-only; ordering is the server-assigned
//! `created_at` and nothing stronger. Sending refetches the full history
//! rather than appending optimistically.

use shared::models::{Message, MessageDraft, SenderRole};
use shared::response::MessageHistory;
use shared::ActorRole;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Chat channel
#[derive(Debug, Clone)]
pub struct ChatChannel {
    http: HttpClient,
}

impl ChatChannel {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Send a message in an inquiry thread and return the refreshed
    /// history. Content must be non-empty after trim; sender identity
    /// comes from the session.
    pub async fn send(&self, inquiry_id: &str, content: &str) -> ClientResult<Vec<Message>> {
        let session = self.http.session().require()?;

        let content = content.trim();
        if content.is_empty() {
            return Err(ClientError::Validation(
                "message content is required".to_string(),
            ));
        }

        let sender_role = match session.role {
            ActorRole::Vendor => SenderRole::Vendor,
            // `both` and admin speak as the buyer side unless they are
            // quoting; the thread records what the backend was told.
            ActorRole::Buyer | ActorRole::Both | ActorRole::Admin => SenderRole::Buyer,
        };

        let draft = MessageDraft {
            inquiry_id: inquiry_id.to_string(),
            sender_id: session.actor_id,
            sender_role,
            content: content.to_string(),
        };

        let _: serde_json::Value = self.http.post_json("/api/chat/message", &draft).await?;
        tracing::debug!(inquiry_id, "Message sent");

        // Full-history refetch, no optimistic append.
        self.history(inquiry_id).await
    }

    /// Fetch the full message history for an inquiry, ascending by
    /// `created_at`. Degrades to an empty result on failure.
    pub async fn history(&self, inquiry_id: &str) -> ClientResult<Vec<Message>> {
        match self
            .http
            .get::<MessageHistory>(&format!("/api/chat/history/{inquiry_id}"))
            .await
        {
            Ok(mut messages) => {
                messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                Ok(messages)
            }
            Err(ClientError::Unauthenticated) => Err(ClientError::Unauthenticated),
            Err(err) => {
                tracing::warn!(error = %err, inquiry_id, "Chat history fetch failed");
                Ok(Vec::new())
            }
        }
    }
}
