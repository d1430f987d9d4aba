//! Client error types
//!
//! One taxonomy for every failure path. Mutation methods always surface
//! their error; list reads degrade to an empty result at the store layer
//! instead of propagating. Nothing here retries - a `Transport` failure is
//! reported and left to an explicit user action, so a mutating request is
//! never issued twice.

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-detected precondition failure; never sent to the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// No bearer credential, or the server rejected it (401)
    #[error("Authentication required")]
    Unauthenticated,

    /// Action outside the actor's role or object ownership (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Target entity changed concurrently (409), e.g. RFQ already closed
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other 4xx/5xx, carrying the backend `detail` verbatim
    #[error("Request rejected ({status}): {detail}")]
    RemoteRejected { status: u16, detail: String },

    /// Network or timeout error
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// The string a UI should show for this failure. Backend `detail` and
    /// provider messages pass through verbatim; transport failures get a
    /// generic retry suggestion.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Unauthenticated => "Please log in to continue".to_string(),
            Self::Forbidden(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
            Self::Conflict(msg) => msg.clone(),
            Self::RemoteRejected { detail, .. } => detail.clone(),
            Self::Transport(_) => "Network error, please try again".to_string(),
            Self::InvalidResponse(_) => "Unexpected server response".to_string(),
        }
    }

    /// Whether the failure happened before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
