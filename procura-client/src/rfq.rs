//! RFQ store
//!
//! Client-side cache and mutation API for RFQ entities. Creation validates
//! locally before any network call; listing is a wholesale cache replace
//! scoped to the actor's role; edits are owner-only and terminal on any
//! 4xx (never retried).

use shared::models::{Rfq, RfqDraft, RfqPatch, RfqStatus};
use shared::response::{Created, RfqList, Updated};
use shared::ActorRole;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::money::{validate_price, validate_quantity};
use crate::store::ListCache;

/// Buyer-supplied fields for a new RFQ. The buyer identity comes from the
/// session, not the caller.
#[derive(Debug, Clone, Default)]
pub struct NewRfq {
    pub title: String,
    pub description: String,
    pub part_description: Option<String>,
    pub quantity: i64,
    pub target_price: Option<f64>,
    pub requirements: Option<String>,
}

/// RFQ store
#[derive(Debug, Clone)]
pub struct RfqStore {
    http: HttpClient,
    cache: ListCache<Rfq>,
}

impl RfqStore {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            cache: ListCache::new(),
        }
    }

    /// Cached RFQs from the last refresh (plus local appends).
    pub fn items(&self) -> Vec<Rfq> {
        self.cache.snapshot()
    }

    /// Create a new RFQ.
    ///
    /// Validates locally first; nothing reaches the network on a
    /// validation failure. On success the new RFQ is appended to the cache
    /// with status `open` (the backend ack carries only the id).
    pub async fn create(&self, fields: NewRfq) -> ClientResult<Rfq> {
        let session = self.http.session().require_buyer()?;

        if fields.title.trim().is_empty() {
            return Err(ClientError::Validation("title is required".to_string()));
        }
        if fields.description.trim().is_empty() {
            return Err(ClientError::Validation(
                "description is required".to_string(),
            ));
        }
        validate_quantity(fields.quantity, "quantity")?;
        if let Some(target) = fields.target_price {
            validate_price(target, "target_price")?;
        }

        let draft = RfqDraft {
            title: fields.title,
            description: fields.description,
            part_description: fields.part_description,
            quantity: fields.quantity,
            buyer_id: session.actor_id.clone(),
            target_price: fields.target_price,
            requirements: fields.requirements,
        };

        let ack: Created = self.http.post_form("/api/rfqs", &draft).await?;
        tracing::debug!(rfq_id = %ack.id, "RFQ created");

        // The ack has no entity body; materialize the cache entry from the
        // draft. It gets replaced wholesale on the next refresh.
        let rfq = Rfq {
            id: ack.id,
            buyer_id: draft.buyer_id,
            title: draft.title,
            description: draft.description,
            part_description: draft.part_description,
            quantity: draft.quantity,
            target_price: draft.target_price,
            requirements: draft.requirements,
            attachments: Vec::new(),
            status: RfqStatus::Open,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        self.cache.push(rfq.clone());
        Ok(rfq)
    }

    /// Refresh the RFQ list for the given view.
    ///
    /// Buyers see their own RFQs, vendors see everything still accepting
    /// quotes, admins see all. Failures degrade to an empty result (they
    /// are logged and must not block the rest of the UI); a stale
    /// response is discarded in favor of the already-applied newer one.
    pub async fn refresh(&self, view: ActorRole) -> Vec<Rfq> {
        let session = match self.http.session().require() {
            Ok(s) => s,
            Err(_) => {
                tracing::warn!("RFQ refresh skipped: no session");
                return Vec::new();
            }
        };

        let path = match view {
            ActorRole::Buyer | ActorRole::Both => {
                format!("/api/rfqs?buyer_id={}", session.actor_id)
            }
            ActorRole::Vendor | ActorRole::Admin => "/api/rfqs".to_string(),
        };

        let generation = self.cache.begin_refresh();
        match self.http.get::<RfqList>(&path).await {
            Ok(list) => {
                let mut rfqs = list.rfqs;
                if view == ActorRole::Vendor {
                    rfqs.retain(|r| r.status.accepts_quotes());
                }
                if !self.cache.apply(generation, rfqs) {
                    return self.cache.snapshot();
                }
                self.cache.snapshot()
            }
            Err(err) => {
                tracing::warn!(error = %err, "RFQ refresh failed");
                Vec::new()
            }
        }
    }

    /// Fetch one RFQ by id.
    pub async fn get(&self, id: &str) -> ClientResult<Rfq> {
        self.http.get(&format!("/api/rfqs/{id}")).await
    }

    /// Edit an open RFQ. Owner-only and only while `open`; the server
    /// enforces both, and any 4xx is terminal.
    pub async fn update(&self, id: &str, patch: RfqPatch) -> ClientResult<()> {
        self.http.session().require_buyer()?;
        if patch.is_empty() {
            return Err(ClientError::Validation("nothing to update".to_string()));
        }
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity, "quantity")?;
        }
        if let Some(target) = patch.target_price {
            validate_price(target, "target_price")?;
        }

        let _: Updated = self.http.put_json(&format!("/api/rfqs/{id}"), &patch).await?;

        // Mirror the accepted patch onto the cached entry until the next
        // refresh replaces it.
        if let Some(mut cached) = self.cache.snapshot().into_iter().find(|r| r.id == id) {
            if let Some(title) = patch.title {
                cached.title = title;
            }
            if let Some(description) = patch.description {
                cached.description = description;
            }
            if let Some(part_description) = patch.part_description {
                cached.part_description = Some(part_description);
            }
            if let Some(quantity) = patch.quantity {
                cached.quantity = quantity;
            }
            if let Some(target_price) = patch.target_price {
                cached.target_price = Some(target_price);
            }
            if let Some(requirements) = patch.requirements {
                cached.requirements = Some(requirements);
            }
            self.cache.replace_where(|r| r.id == id, cached);
        }
        Ok(())
    }

    /// Cancel an open RFQ (buyer action, `open -> cancelled`).
    pub async fn cancel(&self, id: &str) -> ClientResult<()> {
        self.http.session().require_buyer()?;

        // Reject locally when the cached copy already shows a terminal
        // state; the server remains authoritative for the rest.
        if let Some(cached) = self.cache.snapshot().into_iter().find(|r| r.id == id)
            && !cached.status.can_transition(RfqStatus::Cancelled)
        {
            return Err(ClientError::Conflict(format!(
                "RFQ is already {:?}",
                cached.status
            )));
        }

        let _: Updated = self
            .http
            .put_empty(&format!("/api/rfqs/{id}?status=cancelled"))
            .await?;

        if let Some(mut cached) = self.cache.snapshot().into_iter().find(|r| r.id == id) {
            cached.status = RfqStatus::Cancelled;
            self.cache.replace_where(|r| r.id == id, cached);
        }
        Ok(())
    }
}
