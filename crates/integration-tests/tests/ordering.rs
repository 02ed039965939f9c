//! Selection, order placement and mock checkout.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;
use wardrobe_integration_tests::{TestContext, location, sample_catalog};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn select(ctx: &TestContext, product_id: &str) {
    let response = ctx
        .post_form(
            "/cart/toggle",
            &[("product_id", product_id), ("return_to", "/products")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/products");
}

#[tokio::test]
async fn test_toggle_twice_restores_selection() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    ctx.mount_catalog(sample_catalog()).await;

    select(&ctx, "1").await;
    let body = ctx.get("/cart").await.text().await.unwrap();
    assert!(body.contains("Red Tee"));
    assert!(body.contains("Product added to cart!"));

    select(&ctx, "1").await;
    let body = ctx.get("/cart").await.text().await.unwrap();
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("Product removed from cart"));
}

#[tokio::test]
async fn test_successful_order_clears_selection() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    ctx.mount_catalog(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({"product_ids": ["1", "2"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "o1",
            "products": ["1", "2"]
        })))
        .expect(1)
        .mount(&ctx.shop)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "o1", "products": [
                {"id": "1", "name": "Red Tee", "price": 10},
                {"id": "2", "name": "Blue Tee", "price": 12.5}
            ]}
        ])))
        .mount(&ctx.shop)
        .await;

    select(&ctx, "1").await;
    select(&ctx, "2").await;

    let response = ctx.post_form("/orders", &[]).await;
    assert_eq!(location(&response), "/orders");

    let body = ctx.get("/orders").await.text().await.unwrap();
    assert!(body.contains("Order placed successfully!"));
    assert!(body.contains("$22.50"));

    let body = ctx.get("/cart").await.text().await.unwrap();
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_rejected_order_keeps_selection() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    ctx.mount_catalog(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "No valid products found"})),
        )
        .mount(&ctx.shop)
        .await;

    select(&ctx, "1").await;
    let response = ctx.post_form("/orders", &[]).await;
    assert_eq!(location(&response), "/cart");

    let body = ctx.get("/cart").await.text().await.unwrap();
    assert!(body.contains("Error 400: No valid products found"));
    assert!(body.contains("Red Tee"));
}

#[tokio::test]
async fn test_empty_selection_is_not_submitted() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.shop)
        .await;

    let response = ctx.post_form("/orders", &[]).await;
    assert_eq!(location(&response), "/cart");
    let body = ctx.get("/cart").await.text().await.unwrap();
    assert!(body.contains("Select products first!"));
}

#[tokio::test]
async fn test_incomplete_payment_places_no_order() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    ctx.mount_catalog(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "o1"})))
        .expect(0)
        .mount(&ctx.shop)
        .await;

    select(&ctx, "2").await;
    let response = ctx
        .post_form(
            "/checkout",
            &[
                ("card_number", ""),
                ("expiry", "12/30"),
                ("cvc", "123"),
                ("cardholder", "Ada Lovelace"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Please fill in all fields"));
    assert!(body.contains("Ada Lovelace"));
}

#[tokio::test]
async fn test_payment_places_order() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;
    ctx.mount_catalog(sample_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "o1",
            "products": ["2"]
        })))
        .expect(1)
        .mount(&ctx.shop)
        .await;

    select(&ctx, "2").await;
    let response = ctx
        .post_form(
            "/checkout",
            &[
                ("card_number", "4242 4242 4242 4242"),
                ("expiry", "12/30"),
                ("cvc", "123"),
                ("cardholder", "Ada Lovelace"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/orders");
}
