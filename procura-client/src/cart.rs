//! Cart store
//!
//! Buyer-scoped cache over the cart endpoints. Every mutation returns the
//! full updated cart, which replaces the cache; `total_price` is verified
//! against a local decimal recomputation and drift beyond the money
//! tolerance is logged.

use serde::Serialize;

use shared::models::Cart;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::money::{cart_total, money_eq, validate_quantity};
use crate::store::ValueCache;

#[derive(Debug, Serialize)]
struct AddItem<'a> {
    product_id: &'a str,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct UpdateItem {
    quantity: i64,
}

/// Cart store
#[derive(Debug, Clone)]
pub struct CartStore {
    http: HttpClient,
    cache: ValueCache<Cart>,
}

impl CartStore {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            cache: ValueCache::new(),
        }
    }

    /// The cached cart, if one has been fetched.
    pub fn current(&self) -> Option<Cart> {
        self.cache.get()
    }

    /// Total number of units in the cached cart.
    pub fn item_count(&self) -> i64 {
        self.cache.get().map(|c| c.item_count()).unwrap_or(0)
    }

    /// Refresh the cart. Degrades to `None` on failure; a stale response
    /// never overwrites a newer mutation result.
    pub async fn refresh(&self) -> Option<Cart> {
        let generation = self.cache.begin_refresh();
        match self.http.get::<Cart>("/api/cart").await {
            Ok(cart) => {
                verify_total(&cart);
                if !self.cache.apply(generation, cart) {
                    return self.cache.get();
                }
                self.cache.get()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Cart refresh failed");
                None
            }
        }
    }

    /// Add an item (or bump its quantity when already present).
    pub async fn add_item(&self, product_id: &str, quantity: i64) -> ClientResult<Cart> {
        self.http.session().require_buyer()?;
        validate_quantity(quantity, "quantity")?;

        let cart: Cart = self
            .http
            .post_json(
                "/api/cart/items",
                &AddItem {
                    product_id,
                    quantity,
                },
            )
            .await?;
        verify_total(&cart);
        self.cache.set(cart.clone());
        Ok(cart)
    }

    /// Set an item's quantity. Zero is equivalent to removal.
    pub async fn update_quantity(&self, item_id: &str, quantity: i64) -> ClientResult<Cart> {
        self.http.session().require_buyer()?;
        if quantity < 0 {
            return Err(ClientError::Validation(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }
        if quantity == 0 {
            return self.remove_item(item_id).await;
        }

        let cart: Cart = self
            .http
            .put_json(&format!("/api/cart/items/{item_id}"), &UpdateItem { quantity })
            .await?;
        verify_total(&cart);
        self.cache.set(cart.clone());
        Ok(cart)
    }

    /// Remove an item.
    pub async fn remove_item(&self, item_id: &str) -> ClientResult<Cart> {
        self.http.session().require_buyer()?;

        let cart: Cart = self
            .http
            .delete(&format!("/api/cart/items/{item_id}"))
            .await?;
        verify_total(&cart);
        self.cache.set(cart.clone());
        Ok(cart)
    }

    /// Empty the cart.
    pub async fn clear(&self) -> ClientResult<()> {
        self.http.session().require_buyer()?;
        let _: serde_json::Value = self.http.delete("/api/cart").await.or_else(|err| {
            // 204 No Content has an empty body
            if matches!(&err, ClientError::InvalidResponse(_)) {
                Ok(serde_json::Value::Null)
            } else {
                Err(err)
            }
        })?;
        self.cache.clear();
        Ok(())
    }

    /// Drop the cached cart without a network call. Used after checkout,
    /// which empties the server-side cart as its own side effect.
    pub(crate) fn forget(&self) {
        self.cache.clear();
    }
}

/// The server total is authoritative; a mismatch against the local decimal
/// recomputation indicates a price change mid-session and is logged.
fn verify_total(cart: &Cart) {
    let computed = cart_total(&cart.items);
    if !money_eq(computed, cart.total_price) {
        tracing::warn!(
            server = cart.total_price,
            computed,
            cart_id = %cart.id,
            "Cart total drifted from local recomputation"
        );
    }
}
