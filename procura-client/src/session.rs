//! Session context
//!
//! Actor identity is an explicit, passed-down context object rather than
//! ambient global state: one `SessionHandle` is created per client, handed
//! to every store and the orchestrator at construction, populated at login
//! and cleared at logout.

use std::sync::{Arc, RwLock};

use shared::ActorRole;

use crate::error::{ClientError, ClientResult};

/// Authenticated actor identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub actor_id: String,
    pub role: ActorRole,
    /// Bearer credential issued by the external auth provider.
    pub token: String,
}

/// Shared handle to the (possibly absent) current session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the session after login.
    pub fn set(&self, session: Session) {
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    /// Clear the session at logout.
    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    /// Bearer token, or `Unauthenticated` when no session exists. Every
    /// authenticated call goes through this, so a missing token
    /// short-circuits locally instead of issuing the request.
    pub fn bearer(&self) -> ClientResult<String> {
        self.current()
            .map(|s| s.token)
            .ok_or(ClientError::Unauthenticated)
    }

    /// The session, or `Unauthenticated` when absent.
    pub fn require(&self) -> ClientResult<Session> {
        self.current().ok_or(ClientError::Unauthenticated)
    }

    /// Session with a role allowed to buy (create RFQs, decide quotes,
    /// check out).
    pub fn require_buyer(&self) -> ClientResult<Session> {
        let session = self.require()?;
        if !session.role.can_buy() {
            return Err(ClientError::Forbidden(
                "buyer role required".to_string(),
            ));
        }
        Ok(session)
    }

    /// Session with a role allowed to sell (submit quotes).
    pub fn require_vendor(&self) -> ClientResult<Session> {
        let session = self.require()?;
        if !session.role.can_sell() {
            return Err(ClientError::Forbidden(
                "vendor role required".to_string(),
            ));
        }
        Ok(session)
    }

    /// Session with a role allowed to update order fulfilment.
    pub fn require_fulfiller(&self) -> ClientResult<Session> {
        let session = self.require()?;
        if !session.role.can_fulfil() {
            return Err(ClientError::Forbidden(
                "vendor or admin role required".to_string(),
            ));
        }
        Ok(session)
    }
}
