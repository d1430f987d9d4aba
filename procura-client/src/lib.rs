//! Procura Client - marketplace client for the Procura backend
//!
//! Drives the RFQ -> Quote -> Order -> Payment lifecycle against the REST
//! API: per-entity stores with refetch-based caches, a provider-agnostic
//! payment orchestrator, and an explicit session context injected into
//! every component.

pub mod cart;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod money;
pub mod order;
pub mod payment;
pub mod quote;
pub mod rfq;
pub mod session;
pub mod store;

pub use cart::CartStore;
pub use chat::ChatChannel;
pub use client::MarketplaceClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use order::OrderStore;
pub use payment::{
    ApprovalOutcome, PaymentAttempt, PaymentGateway, PaymentOrchestrator, PaymentStatus,
};
pub use quote::QuoteStore;
pub use rfq::RfqStore;
pub use session::{Session, SessionHandle};

// Re-export shared types for convenience
pub use shared::models::{Cart, Message, Order, Quote, Rfq};
pub use shared::ActorRole;
