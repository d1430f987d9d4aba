//! Marketplace client facade
//!
//! Wires one session context and one HTTP transport into every store and
//! the payment orchestrator, so all components observe the same identity
//! and talk to the same backend.

use shared::ActorRole;

use crate::cart::CartStore;
use crate::chat::ChatChannel;
use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::order::OrderStore;
use crate::payment::PaymentOrchestrator;
use crate::quote::QuoteStore;
use crate::rfq::RfqStore;
use crate::session::{Session, SessionHandle};

/// Entry point tying the marketplace stores together.
#[derive(Clone)]
pub struct MarketplaceClient {
    session: SessionHandle,
    pub rfqs: RfqStore,
    pub quotes: QuoteStore,
    pub chat: ChatChannel,
    pub cart: CartStore,
    pub orders: OrderStore,
    pub payments: PaymentOrchestrator,
}

impl MarketplaceClient {
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionHandle::new();
        let http = HttpClient::new(&config, session.clone());

        let cart = CartStore::new(http.clone());
        Self {
            rfqs: RfqStore::new(http.clone()),
            quotes: QuoteStore::new(http.clone()),
            chat: ChatChannel::new(http.clone()),
            orders: OrderStore::new(http.clone(), cart.clone()),
            payments: PaymentOrchestrator::new(http),
            cart,
            session,
        }
    }

    /// Install the identity the external auth provider verified.
    pub fn login_as(&self, actor_id: impl Into<String>, role: ActorRole, token: impl Into<String>) {
        self.session.set(Session {
            actor_id: actor_id.into(),
            role,
            token: token.into(),
        });
    }

    /// Drop the session. Cached data stays until the next refresh; every
    /// subsequent authenticated call fails locally with `Unauthenticated`.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// The shared session context.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}
