//! Quote store
//!
//! Cache and mutation API for Quote entities scoped to an RFQ or vendor.
//! Acceptance is transactional on the server (sibling rejection, RFQ
//! closure, order materialization); the client never synthesizes those
//! side effects locally - it refetches after the call resolves.

use shared::models::{Quote, QuoteDraft, QuoteStatus};
use shared::response::{Created, QuoteList, Updated};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::money::validate_price;
use crate::store::ListCache;

/// Vendor-supplied fields for a new quote. The vendor identity comes from
/// the session.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub rfq_id: String,
    pub price: f64,
    /// ISO 4217 code, e.g. "USD"
    pub currency: String,
    pub delivery_time: String,
    pub notes: Option<String>,
}

/// Filter for quote listing.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub rfq_id: Option<String>,
    pub vendor_id: Option<String>,
    pub status: Option<QuoteStatus>,
}

impl QuoteFilter {
    /// Quotes under one RFQ (buyer comparison view).
    pub fn for_rfq(rfq_id: impl Into<String>) -> Self {
        Self {
            rfq_id: Some(rfq_id.into()),
            ..Self::default()
        }
    }

    /// Quotes submitted by one vendor ("my quotes" view).
    pub fn for_vendor(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            ..Self::default()
        }
    }

    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(rfq_id) = &self.rfq_id {
            params.push(format!("rfq_id={rfq_id}"));
        }
        if let Some(vendor_id) = &self.vendor_id {
            params.push(format!("vendor_id={vendor_id}"));
        }
        if let Some(status) = &self.status {
            params.push(format!(
                "status={}",
                serde_json::to_value(status)
                    .expect("status serializes")
                    .as_str()
                    .unwrap_or_default()
            ));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Quote store
#[derive(Debug, Clone)]
pub struct QuoteStore {
    http: HttpClient,
    cache: ListCache<Quote>,
}

impl QuoteStore {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            cache: ListCache::new(),
        }
    }

    /// Cached quotes from the last refresh.
    pub fn items(&self) -> Vec<Quote> {
        self.cache.snapshot()
    }

    /// Submit a quote against an RFQ (vendor-only).
    ///
    /// The owning RFQ moves `open -> quoted` server-side; the client
    /// observes that on its next RFQ refresh.
    pub async fn submit(&self, fields: NewQuote) -> ClientResult<Quote> {
        let session = self.http.session().require_vendor()?;

        validate_price(fields.price, "price")?;
        validate_currency(&fields.currency)?;
        if fields.delivery_time.trim().is_empty() {
            return Err(ClientError::Validation(
                "delivery_time is required".to_string(),
            ));
        }

        let draft = QuoteDraft {
            rfq_id: fields.rfq_id,
            vendor_id: session.actor_id,
            price: fields.price,
            currency: fields.currency.to_ascii_uppercase(),
            delivery_time: fields.delivery_time,
            notes: fields.notes,
        };

        let ack: Created = self.http.post_json("/api/quotes", &draft).await?;
        tracing::debug!(quote_id = %ack.id, rfq_id = %draft.rfq_id, "Quote submitted");

        let quote = Quote {
            id: ack.id,
            rfq_id: draft.rfq_id,
            vendor_id: draft.vendor_id,
            price: draft.price,
            currency: draft.currency,
            delivery_time: draft.delivery_time,
            notes: draft.notes,
            status: QuoteStatus::Pending,
            valid_until: None,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        self.cache.push(quote.clone());
        Ok(quote)
    }

    /// Refresh the quote list for the given filter. Wholesale replace;
    /// failures degrade to an empty result, stale responses are discarded.
    pub async fn refresh(&self, filter: &QuoteFilter) -> Vec<Quote> {
        let generation = self.cache.begin_refresh();
        let path = format!("/api/quotes{}", filter.query());
        match self.http.get::<QuoteList>(&path).await {
            Ok(list) => {
                if !self.cache.apply(generation, list.quotes) {
                    return self.cache.snapshot();
                }
                self.cache.snapshot()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Quote refresh failed");
                Vec::new()
            }
        }
    }

    /// Fetch one quote by id.
    pub async fn get(&self, id: &str) -> ClientResult<Quote> {
        self.http.get(&format!("/api/quotes/{id}")).await
    }

    /// Accept a quote (buyer-only).
    ///
    /// Transactional on the server: the quote becomes `accepted`, sibling
    /// pending quotes become `rejected`, the RFQ closes, and an order is
    /// materialized. When the RFQ was already closed by a racing
    /// acceptance the server answers `Conflict`; the store refreshes the
    /// quote list for that RFQ and reports "quote no longer available".
    pub async fn accept(&self, quote_id: &str) -> ClientResult<()> {
        self.decide(quote_id, QuoteStatus::Accepted).await
    }

    /// Reject a quote (buyer-only).
    pub async fn reject(&self, quote_id: &str) -> ClientResult<()> {
        self.decide(quote_id, QuoteStatus::Rejected).await
    }

    async fn decide(&self, quote_id: &str, decision: QuoteStatus) -> ClientResult<()> {
        self.http.session().require_buyer()?;

        let status = match decision {
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
            _ => {
                return Err(ClientError::Validation(
                    "decision must be accepted or rejected".to_string(),
                ))
            }
        };

        let result: ClientResult<Updated> = self
            .http
            .put_empty(&format!("/api/quotes/{quote_id}?status={status}"))
            .await;

        match result {
            Ok(_) => {
                // The decision's cascade (sibling rejection, RFQ closure,
                // order creation) is observed on refetch, never computed
                // here.
                if let Some(mut cached) =
                    self.cache.snapshot().into_iter().find(|q| q.id == quote_id)
                    && cached.status.can_transition(decision)
                {
                    cached.status = decision;
                    self.cache.replace_where(|q| q.id == quote_id, cached);
                }
                Ok(())
            }
            Err(ClientError::Conflict(_)) => {
                // Lost the race with another acceptance. Refetch so the UI
                // shows the authoritative state.
                let rfq_id = self
                    .cache
                    .snapshot()
                    .into_iter()
                    .find(|q| q.id == quote_id)
                    .map(|q| q.rfq_id);
                if let Some(rfq_id) = rfq_id {
                    self.refresh(&QuoteFilter::for_rfq(rfq_id)).await;
                }
                Err(ClientError::Conflict(
                    "quote no longer available".to_string(),
                ))
            }
            Err(err) => Err(err),
        }
    }
}

/// ISO 4217 shape check: three ASCII letters.
fn validate_currency(code: &str) -> ClientResult<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "currency must be a 3-letter ISO 4217 code, got {code:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_shape() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("eur").is_ok());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("USDT").is_err());
        assert!(validate_currency("U$D").is_err());
    }

    #[test]
    fn test_filter_query_strings() {
        assert_eq!(QuoteFilter::default().query(), "");
        assert_eq!(QuoteFilter::for_rfq("r1").query(), "?rfq_id=r1");
        assert_eq!(QuoteFilter::for_vendor("v1").query(), "?vendor_id=v1");

        let filter = QuoteFilter {
            rfq_id: Some("r1".to_string()),
            status: Some(QuoteStatus::Pending),
            ..QuoteFilter::default()
        };
        assert_eq!(filter.query(), "?rfq_id=r1&status=pending");
    }
}
