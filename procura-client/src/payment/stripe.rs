//! Stripe gateway (intent-based flow)
//!
//! `begin` requests a payment intent; the SDK's user-facing confirmation
//! (possibly suspended by a 3-D-Secure challenge) happens outside this
//! system and its result is fed into `confirm`. A failed or abandoned
//! Stripe confirmation is always `failed`, never silently reset.

use async_trait::async_trait;

use shared::models::{PaymentProvider, StripeIntentCreated};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

use super::gateway::{
    ApprovalOutcome, ConfirmResult, PaymentGateway, ProviderRef, GENERIC_FAILURE,
};

/// Stripe gateway
#[derive(Debug, Clone)]
pub struct StripeGateway {
    http: HttpClient,
}

impl StripeGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    async fn begin(&self, order_id: &str) -> ClientResult<ProviderRef> {
        let intent: StripeIntentCreated = self
            .http
            .post_empty(&format!(
                "/api/payments/stripe/create-intent?order_id={order_id}"
            ))
            .await?;
        tracing::debug!(order_id, intent_id = %intent.payment_intent_id, "Stripe intent created");
        Ok(ProviderRef::Stripe {
            client_secret: intent.client_secret,
            payment_intent_id: intent.payment_intent_id,
        })
    }

    async fn confirm(
        &self,
        provider_ref: &ProviderRef,
        outcome: ApprovalOutcome,
    ) -> ClientResult<ConfirmResult> {
        let ProviderRef::Stripe {
            payment_intent_id, ..
        } = provider_ref
        else {
            return Err(ClientError::Validation(
                "attempt does not belong to the stripe gateway".to_string(),
            ));
        };

        // The SDK already performed the charge attempt synchronously; here
        // the outcome is only mapped onto the attempt state.
        let result = match outcome {
            ApprovalOutcome::Approved => ConfirmResult::Succeeded,
            ApprovalOutcome::Declined(reason) => {
                ConfirmResult::Failed(reason.unwrap_or_else(|| GENERIC_FAILURE.to_string()))
            }
            ApprovalOutcome::Cancelled => {
                // A charge may already have been attempted by the SDK
                ConfirmResult::Failed("payment cancelled".to_string())
            }
        };
        tracing::debug!(intent_id = %payment_intent_id, ?result, "Stripe confirmation mapped");
        Ok(result)
    }
}
