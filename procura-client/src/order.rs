//! Order store and materializer
//!
//! Orders come into existence exactly once: server-side on quote
//! acceptance (observed via refresh), or through `checkout` here. After
//! creation only fulfilment fields move (vendor/admin) and the payment
//! status (orchestrator).

use serde::Serialize;

use shared::models::{Order, OrderUpdate};
use shared::response::{OrderList, Updated};

use crate::cart::CartStore;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::money::{money_eq, order_total};
use crate::store::ListCache;

#[derive(Debug, Serialize)]
struct CheckoutRequest<'a> {
    shipping_address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// Filter for order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub buyer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub status: Option<String>,
}

impl OrderFilter {
    pub fn for_buyer(buyer_id: impl Into<String>) -> Self {
        Self {
            buyer_id: Some(buyer_id.into()),
            ..Self::default()
        }
    }

    pub fn for_vendor(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            ..Self::default()
        }
    }

    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(buyer_id) = &self.buyer_id {
            params.push(format!("buyer_id={buyer_id}"));
        }
        if let Some(vendor_id) = &self.vendor_id {
            params.push(format!("vendor_id={vendor_id}"));
        }
        if let Some(status) = &self.status {
            params.push(format!("status={status}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Order store
#[derive(Debug, Clone)]
pub struct OrderStore {
    http: HttpClient,
    cache: ListCache<Order>,
    cart: CartStore,
}

impl OrderStore {
    pub fn new(http: HttpClient, cart: CartStore) -> Self {
        Self {
            http,
            cache: ListCache::new(),
            cart,
        }
    }

    /// Cached orders from the last refresh.
    pub fn items(&self) -> Vec<Order> {
        self.cache.snapshot()
    }

    /// Check out the current cart into a new order.
    ///
    /// Fails locally when the shipping address is blank or the cached
    /// cart is empty. On success the originating cart is cleared and the
    /// order arrives `pending` with payment `idle`.
    pub async fn checkout(
        &self,
        shipping_address: &str,
        notes: Option<&str>,
    ) -> ClientResult<Order> {
        self.http.session().require_buyer()?;

        if shipping_address.trim().is_empty() {
            return Err(ClientError::Validation(
                "shipping address is required".to_string(),
            ));
        }
        if self.cart.current().is_none_or(|c| c.is_empty()) {
            return Err(ClientError::Validation("cart is empty".to_string()));
        }

        let order: Order = self
            .http
            .post_json(
                "/api/orders/checkout",
                &CheckoutRequest {
                    shipping_address: shipping_address.trim(),
                    notes,
                },
            )
            .await?;

        // total_amount is fixed at creation; verify it against the items
        // and log drift, never correct it.
        if !order.items.is_empty() && !money_eq(order_total(&order.items), order.total_amount) {
            tracing::warn!(
                order_id = %order.id,
                total = order.total_amount,
                "Order total does not match its items"
            );
        }

        tracing::debug!(order_id = %order.id, "Checkout completed");
        self.cart.forget();
        self.cache.push(order.clone());
        Ok(order)
    }

    /// Refresh the order list for the given filter. Wholesale replace;
    /// failures degrade to an empty result, stale responses are discarded.
    pub async fn refresh(&self, filter: &OrderFilter) -> Vec<Order> {
        let generation = self.cache.begin_refresh();
        let path = format!("/api/orders{}", filter.query());
        match self.http.get::<OrderList>(&path).await {
            Ok(list) => {
                if !self.cache.apply(generation, list.orders) {
                    return self.cache.snapshot();
                }
                self.cache.snapshot()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Order refresh failed");
                Vec::new()
            }
        }
    }

    /// Fetch one order by id.
    pub async fn get(&self, id: &str) -> ClientResult<Order> {
        self.http.get(&format!("/api/orders/{id}")).await
    }

    /// Update fulfilment fields (vendor/admin only).
    pub async fn update(&self, id: &str, update: OrderUpdate) -> ClientResult<()> {
        self.http.session().require_fulfiller()?;
        if update.status.is_none() && update.tracking_number.is_none() {
            return Err(ClientError::Validation("nothing to update".to_string()));
        }

        let _: Updated = self
            .http
            .put_json(&format!("/api/orders/{id}"), &update)
            .await?;

        if let Some(mut cached) = self.cache.snapshot().into_iter().find(|o| o.id == id) {
            if let Some(status) = update.status {
                cached.status = status;
            }
            if let Some(tracking) = update.tracking_number {
                cached.tracking_number = Some(tracking);
            }
            self.cache.replace_where(|o| o.id == id, cached);
        }
        Ok(())
    }
}
