//! Shared types for the Procura marketplace client
//!
//! Wire-level data models (RFQ, Quote, Order, Cart, chat messages, payment
//! records), response envelopes, and actor/role types used across crates.
//! Everything here is pure data: serde derives, status tables, no I/O.

pub mod models;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use types::ActorRole;
