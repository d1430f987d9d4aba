//! PayPal gateway (order/capture flow)
//!
//! `begin` creates the provider order; the buyer approval runs in
//! PayPal's own redirect-or-popup UI. On approval `confirm` issues the
//! capture call and maps `COMPLETED` to success. A cancel during the
//! approval step resets the attempt to idle - no charge was attempted and
//! no capture call is ever issued.

use async_trait::async_trait;

use shared::models::{CaptureResult, PaymentProvider, PayPalOrderCreated};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

use super::gateway::{
    ApprovalOutcome, ConfirmResult, PaymentGateway, ProviderRef, GENERIC_FAILURE,
};

/// PayPal gateway
#[derive(Debug, Clone)]
pub struct PayPalGateway {
    http: HttpClient,
}

impl PayPalGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PaymentGateway for PayPalGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paypal
    }

    async fn begin(&self, order_id: &str) -> ClientResult<ProviderRef> {
        let created: PayPalOrderCreated = self
            .http
            .post_empty(&format!(
                "/api/payments/paypal/create-order?order_id={order_id}"
            ))
            .await?;
        tracing::debug!(order_id, paypal_order_id = %created.paypal_order_id, "PayPal order created");
        Ok(ProviderRef::PayPal {
            paypal_order_id: created.paypal_order_id,
            approval_url: created.approval_url,
        })
    }

    async fn confirm(
        &self,
        provider_ref: &ProviderRef,
        outcome: ApprovalOutcome,
    ) -> ClientResult<ConfirmResult> {
        let ProviderRef::PayPal {
            paypal_order_id, ..
        } = provider_ref
        else {
            return Err(ClientError::Validation(
                "attempt does not belong to the paypal gateway".to_string(),
            ));
        };

        match outcome {
            ApprovalOutcome::Approved => {
                let capture: CaptureResult = self
                    .http
                    .post_empty(&format!(
                        "/api/payments/paypal/capture?paypal_order_id={paypal_order_id}"
                    ))
                    .await?;
                if capture.is_completed() {
                    Ok(ConfirmResult::Succeeded)
                } else {
                    tracing::warn!(paypal_order_id = %paypal_order_id, status = %capture.status, "PayPal capture not completed");
                    Ok(ConfirmResult::Failed(format!(
                        "payment capture returned {}",
                        capture.status
                    )))
                }
            }
            ApprovalOutcome::Declined(reason) => Ok(ConfirmResult::Failed(
                reason.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            )),
            // No charge was attempted; never call capture here
            ApprovalOutcome::Cancelled => Ok(ConfirmResult::ResetToIdle),
        }
    }
}
