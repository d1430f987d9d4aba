//! Actor identity types

use serde::{Deserialize, Serialize};

/// Role of the authenticated actor.
///
/// `Both` accounts trade on both sides of the marketplace and satisfy
/// buyer gates as well as vendor gates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Buyer,
    Vendor,
    Both,
    Admin,
}

impl ActorRole {
    /// Whether this role may create RFQs, accept quotes, and check out.
    pub fn can_buy(&self) -> bool {
        matches!(self, Self::Buyer | Self::Both | Self::Admin)
    }

    /// Whether this role may submit quotes against an RFQ.
    pub fn can_sell(&self) -> bool {
        matches!(self, Self::Vendor | Self::Both | Self::Admin)
    }

    /// Whether this role may update order fulfilment (status, tracking).
    pub fn can_fulfil(&self) -> bool {
        matches!(self, Self::Vendor | Self::Both | Self::Admin)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Buyer => "buyer",
            Self::Vendor => "vendor",
            Self::Both => "both",
            Self::Admin => "admin",
        };
        f.write_str(s)
    }
}
