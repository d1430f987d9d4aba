//! Payment gateway capability trait
//!
//! Both providers sit behind one interface so the orchestrator's state
//! machine stays provider-agnostic: `begin` creates the provider-side
//! intent/order, `confirm` folds the externally observed approval outcome
//! (SDK confirmation, redirect approval, user cancel) into one terminal
//! result.

use async_trait::async_trait;

use shared::models::PaymentProvider;

use crate::error::ClientResult;

/// Provider-side reference created by `begin`.
#[derive(Debug, Clone)]
pub enum ProviderRef {
    Stripe {
        /// Handed to the Stripe SDK's confirmation call
        client_secret: String,
        payment_intent_id: String,
    },
    PayPal {
        paypal_order_id: String,
        approval_url: Option<String>,
    },
}

/// What the external, user-facing provider step reported back.
///
/// The approval UI itself (Stripe 3-D-Secure challenge, PayPal redirect or
/// popup) runs outside this system; the embedding application feeds its
/// outcome in here.
#[derive(Debug, Clone)]
pub enum ApprovalOutcome {
    /// The provider step completed successfully
    Approved,
    /// The provider declined, with its message when one was given
    Declined(Option<String>),
    /// The user backed out of the external step
    Cancelled,
}

/// Terminal result of confirming one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmResult {
    Succeeded,
    Failed(String),
    /// No charge was ever attempted; the attempt resets to idle
    ResetToIdle,
}

/// One provider flow behind the orchestrator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Create the provider-side intent/order for this order.
    async fn begin(&self, order_id: &str) -> ClientResult<ProviderRef>;

    /// Fold the external approval outcome into a terminal result. May
    /// issue further provider calls (PayPal capture); must never do so
    /// for a cancelled approval.
    async fn confirm(
        &self,
        provider_ref: &ProviderRef,
        outcome: ApprovalOutcome,
    ) -> ClientResult<ConfirmResult>;
}

/// Fallback user-visible reason when the provider supplied none.
pub(crate) const GENERIC_FAILURE: &str = "payment failed";
