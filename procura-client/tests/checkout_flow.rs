mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use procura_client::ClientError;
use shared::models::{OrderStatus, PaymentState};
use shared::ActorRole;

use common::client_for;

fn cart_json(items: serde_json::Value, total: f64) -> serde_json::Value {
    json!({"id": "cart-1", "items": items, "total_price": total})
}

fn two_item_cart() -> serde_json::Value {
    cart_json(
        json!([
            {"id": "item-1", "product_id": "part-6204", "quantity": 2,
             "product_name": "Bearing 6204", "price": 10.0},
            {"id": "item-2", "product_id": "seal-35", "quantity": 1,
             "product_name": "Shaft seal", "price": 5.0}
        ]),
        25.0,
    )
}

#[tokio::test]
async fn mutations_replace_the_cached_cart_wholesale() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_item_cart()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/items/item-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(
            json!([
                {"id": "item-1", "product_id": "part-6204", "quantity": 2,
                 "product_name": "Bearing 6204", "price": 10.0}
            ]),
            20.0,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let cart = client.cart.add_item("seal-35", 1).await.unwrap();
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total_price, 25.0);

    let cart = client.cart.remove_item("item-2").await.unwrap();
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total_price, 20.0);
    assert_eq!(client.cart.item_count(), 2);
}

#[tokio::test]
async fn zero_quantity_update_is_a_removal() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    Mock::given(method("DELETE"))
        .and(path("/api/cart/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(json!([]), 0.0)))
        .expect(1)
        .mount(&server)
        .await;
    // The PUT endpoint must never be hit for quantity zero.
    Mock::given(method("PUT"))
        .and(path("/api/cart/items/item-1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let cart = client.cart.update_quantity("item-1", 0).await.unwrap();
    assert!(cart.is_empty());

    let err = client.cart.update_quantity("item-1", -1).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn checkout_materializes_an_order_and_forgets_the_cart() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_item_cart()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "order-1",
            "buyer_id": "buyer-1",
            "source": "cart_checkout",
            "items": [
                {"product_ref": "part-6204", "quantity": 2, "unit_price": 10.0},
                {"product_ref": "seal-35", "quantity": 1, "unit_price": 5.0}
            ],
            "total_amount": 25.0,
            "currency": "USD",
            "status": "pending",
            "payment_status": "idle",
            "shipping_address": "1 Factory Rd",
            "created_at": "2026-01-12T08:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.cart.refresh().await;
    let order = client
        .orders
        .checkout("1 Factory Rd", None)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentState::Idle);
    assert!(order.vendor_id.is_none());
    assert_eq!(order.total_amount, 25.0);

    // Checkout emptied the server-side cart; the local copy is dropped
    // without another network call.
    assert!(client.cart.current().is_none());
    assert_eq!(client.orders.items().len(), 1);
}

#[tokio::test]
async fn checkout_refused_locally_without_a_cart() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/checkout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let no_cart = client.orders.checkout("1 Factory Rd", None).await.unwrap_err();
    assert!(matches!(no_cart, ClientError::Validation(_)));

    let blank_address = client.orders.checkout("   ", None).await.unwrap_err();
    assert!(matches!(blank_address, ClientError::Validation(_)));
}

#[tokio::test]
async fn cart_refresh_degrades_to_none_on_failure() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "database unavailable"
        })))
        .mount(&server)
        .await;

    assert!(client.cart.refresh().await.is_none());
    assert_eq!(client.cart.item_count(), 0);
}

#[tokio::test]
async fn clear_tolerates_an_empty_response_body() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_item_cart()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.cart.refresh().await;
    client.cart.clear().await.unwrap();
    assert!(client.cart.current().is_none());
}

#[tokio::test]
async fn stale_refresh_never_overwrites_a_newer_mutation() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;

    // The refresh answers late with a pre-mutation snapshot.
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cart_json(json!([]), 0.0))
                .set_delay(std::time::Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_item_cart()))
        .mount(&server)
        .await;

    let slow_refresh = client.cart.refresh();
    let mutation = async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        client.cart.add_item("seal-35", 1).await.unwrap()
    };
    tokio::join!(slow_refresh, mutation);

    // The stale snapshot was discarded in favor of the mutation result.
    assert_eq!(client.cart.item_count(), 3);
}

#[tokio::test]
async fn fulfilment_update_requires_vendor_or_admin() {
    let (server, client) = client_for("buyer-1", ActorRole::Buyer).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .orders
        .update(
            "order-1",
            shared::models::OrderUpdate {
                status: Some(OrderStatus::Shipped),
                tracking_number: Some("TRK-1".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn fulfilment_update_mirrors_onto_cache() {
    let (server, client) = client_for("vendor-1", ActorRole::Vendor).await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{
                "id": "order-1",
                "buyer_id": "buyer-1",
                "vendor_id": "vendor-1",
                "source": "rfq_quote",
                "items": [{"product_ref": "part-6204", "quantity": 50, "unit_price": 24.5}],
                "total_amount": 1225.0,
                "currency": "USD",
                "status": "processing",
                "payment_status": "succeeded",
                "created_at": "2026-01-12T08:00:00"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/order-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Order updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .orders
        .refresh(&procura_client::order::OrderFilter::for_vendor("vendor-1"))
        .await;
    client
        .orders
        .update(
            "order-1",
            shared::models::OrderUpdate {
                status: Some(OrderStatus::Shipped),
                tracking_number: Some("TRK-1".to_string()),
            },
        )
        .await
        .unwrap();

    let cached = &client.orders.items()[0];
    assert_eq!(cached.status, OrderStatus::Shipped);
    assert_eq!(cached.tracking_number.as_deref(), Some("TRK-1"));
}
