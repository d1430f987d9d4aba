//! Payment orchestrator
//!
//! Drives a single order to `succeeded` via exactly one of two
//! interchangeable provider flows, exposing one provider-agnostic
//! [`PaymentStatus`]:
//!
//! ```text
//! idle --(begin)--> processing
//! processing --(provider confirms)--> succeeded   [terminal]
//! processing --(decline / error / user cancel)--> failed
//! failed --(retry)--> processing
//! ```
//!
//! One attempt may be in flight per order: `begin` refuses while a
//! previous attempt for the same order is still `processing`. That guard
//! is client-side only - the backend and the providers own final
//! at-most-one-charge correctness - but it keeps this client from issuing
//! a second create-intent call while one is outstanding.

mod gateway;
mod paypal;
mod stripe;

pub use gateway::{ApprovalOutcome, ConfirmResult, PaymentGateway, ProviderRef};
pub use paypal::PayPalGateway;
pub use stripe::StripeGateway;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared::models::{PaymentProvider, PaymentRecord};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Provider-agnostic payment status for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    /// Legal transition table. Forward-monotonic except `failed -> idle`
    /// (explicit reset) and `failed -> processing` (retry). `succeeded`
    /// is terminal for the attempt.
    pub fn can_transition(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Idle, Processing)
                | (Processing, Succeeded)
                | (Processing, Failed)
                | (Processing, Idle)
                | (Failed, Processing)
                | (Failed, Idle)
        )
    }
}

/// One provider-scoped try at collecting funds for an order.
#[derive(Debug, Clone)]
pub struct PaymentAttempt {
    pub attempt_id: String,
    pub order_id: String,
    pub provider: PaymentProvider,
    /// Present once the provider-side intent/order exists
    pub provider_ref: Option<ProviderRef>,
    pub status: PaymentStatus,
    /// User-visible reason for a failed attempt
    pub failure: Option<String>,
}

/// Payment orchestrator
#[derive(Clone)]
pub struct PaymentOrchestrator {
    gateways: Arc<Vec<Arc<dyn PaymentGateway>>>,
    /// Latest attempt per order id
    attempts: Arc<Mutex<HashMap<String, PaymentAttempt>>>,
    http: HttpClient,
}

impl PaymentOrchestrator {
    /// Orchestrator with the two production gateways.
    pub fn new(http: HttpClient) -> Self {
        let gateways: Vec<Arc<dyn PaymentGateway>> = vec![
            Arc::new(StripeGateway::new(http.clone())),
            Arc::new(PayPalGateway::new(http.clone())),
        ];
        Self::with_gateways(http, gateways)
    }

    /// Orchestrator with caller-supplied gateways (tests swap in mocks).
    pub fn with_gateways(http: HttpClient, gateways: Vec<Arc<dyn PaymentGateway>>) -> Self {
        Self {
            gateways: Arc::new(gateways),
            attempts: Arc::new(Mutex::new(HashMap::new())),
            http,
        }
    }

    fn gateway(&self, provider: PaymentProvider) -> ClientResult<Arc<dyn PaymentGateway>> {
        self.gateways
            .iter()
            .find(|g| g.provider() == provider)
            .cloned()
            .ok_or_else(|| {
                ClientError::Validation(format!("no gateway registered for {provider}"))
            })
    }

    /// Current status for an order (`Idle` when no attempt exists).
    pub fn status(&self, order_id: &str) -> PaymentStatus {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .get(order_id)
            .map(|a| a.status)
            .unwrap_or_default()
    }

    /// User-visible reason for the latest failed attempt, if any.
    pub fn failure_reason(&self, order_id: &str) -> Option<String> {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .get(order_id)
            .and_then(|a| a.failure.clone())
    }

    /// The latest attempt for an order.
    pub fn attempt(&self, order_id: &str) -> Option<PaymentAttempt> {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .get(order_id)
            .cloned()
    }

    /// Start a payment attempt for an order with the selected provider.
    ///
    /// Refused while another attempt for the same order is `processing`
    /// (the in-flight guard) or once one has `succeeded`. Starting from
    /// `failed` is the retry edge. A failed provider create marks the
    /// attempt `failed` with the backend's reason.
    pub async fn begin(
        &self,
        provider: PaymentProvider,
        order_id: &str,
    ) -> ClientResult<PaymentAttempt> {
        self.http.session().require_buyer()?;
        let gateway = self.gateway(provider)?;

        // Claim the processing slot before awaiting anything so a second
        // begin for the same order is refused while ours is outstanding.
        {
            let mut attempts = self.attempts.lock().expect("attempts lock poisoned");
            match attempts.get(order_id).map(|a| a.status) {
                Some(PaymentStatus::Processing) => {
                    return Err(ClientError::Conflict(
                        "a payment attempt for this order is already in progress".to_string(),
                    ));
                }
                Some(PaymentStatus::Succeeded) => {
                    return Err(ClientError::Conflict(
                        "this order is already paid".to_string(),
                    ));
                }
                Some(PaymentStatus::Idle) | Some(PaymentStatus::Failed) | None => {}
            }
            attempts.insert(
                order_id.to_string(),
                PaymentAttempt {
                    attempt_id: uuid::Uuid::new_v4().to_string(),
                    order_id: order_id.to_string(),
                    provider,
                    provider_ref: None,
                    status: PaymentStatus::Processing,
                    failure: None,
                },
            );
        }

        match gateway.begin(order_id).await {
            Ok(provider_ref) => {
                let mut attempts = self.attempts.lock().expect("attempts lock poisoned");
                let attempt = attempts
                    .get_mut(order_id)
                    .expect("attempt inserted above");
                attempt.provider_ref = Some(provider_ref);
                Ok(attempt.clone())
            }
            Err(err) => {
                let reason = err.user_message();
                self.transition(order_id, PaymentStatus::Failed, Some(reason));
                Err(err)
            }
        }
    }

    /// Fold the external approval outcome into the attempt state.
    ///
    /// Returns the resulting status; a capture-layer transport failure is
    /// also folded into `Failed` (with the generic retry message) rather
    /// than leaving the attempt stuck in `processing`.
    pub async fn resolve(
        &self,
        order_id: &str,
        outcome: ApprovalOutcome,
    ) -> ClientResult<PaymentStatus> {
        let attempt = self
            .attempt(order_id)
            .filter(|a| a.status == PaymentStatus::Processing)
            .ok_or_else(|| {
                ClientError::Conflict("no payment attempt in progress for this order".to_string())
            })?;
        let provider_ref = attempt.provider_ref.clone().ok_or_else(|| {
            ClientError::Conflict("payment attempt has no provider reference yet".to_string())
        })?;

        let gateway = self.gateway(attempt.provider)?;
        let result = match gateway.confirm(&provider_ref, outcome).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, order_id, "Provider confirmation failed");
                ConfirmResult::Failed(err.user_message())
            }
        };

        let status = match result {
            ConfirmResult::Succeeded => {
                self.transition(order_id, PaymentStatus::Succeeded, None);
                PaymentStatus::Succeeded
            }
            ConfirmResult::Failed(reason) => {
                self.transition(order_id, PaymentStatus::Failed, Some(reason));
                PaymentStatus::Failed
            }
            ConfirmResult::ResetToIdle => {
                self.transition(order_id, PaymentStatus::Idle, None);
                PaymentStatus::Idle
            }
        };
        Ok(status)
    }

    /// Explicitly reset a failed attempt to idle.
    pub fn reset(&self, order_id: &str) -> ClientResult<()> {
        let mut attempts = self.attempts.lock().expect("attempts lock poisoned");
        match attempts.get_mut(order_id) {
            Some(attempt) if attempt.status == PaymentStatus::Failed => {
                attempt.status = PaymentStatus::Idle;
                attempt.failure = None;
                Ok(())
            }
            Some(attempt) => Err(ClientError::Conflict(format!(
                "cannot reset a {:?} attempt",
                attempt.status
            ))),
            None => Ok(()),
        }
    }

    /// Poll the persisted payment record.
    pub async fn record(&self, payment_id: &str) -> ClientResult<PaymentRecord> {
        self.http.get(&format!("/api/payments/{payment_id}")).await
    }

    fn transition(&self, order_id: &str, next: PaymentStatus, failure: Option<String>) {
        let mut attempts = self.attempts.lock().expect("attempts lock poisoned");
        let Some(attempt) = attempts.get_mut(order_id) else {
            return;
        };
        if !attempt.status.can_transition(next) {
            tracing::error!(
                order_id,
                from = ?attempt.status,
                to = ?next,
                "Illegal payment status transition dropped"
            );
            return;
        }
        attempt.status = next;
        attempt.failure = failure;
    }
}
