//! Theme preference and admin gating.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use wardrobe_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_dark_mode_toggle_persists() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(!body.contains(r#"class="dark""#));

    let response = ctx
        .post_form("/preferences/theme", &[("return_to", "/")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(body.contains(r#"class="dark""#));

    ctx.post_form("/preferences/theme", &[("return_to", "/")])
        .await;
    let body = ctx.get("/").await.text().await.unwrap();
    assert!(!body.contains(r#"class="dark""#));
}

#[tokio::test]
async fn test_theme_survives_login() {
    let ctx = TestContext::new().await;
    ctx.post_form("/preferences/theme", &[("return_to", "/")])
        .await;
    ctx.login_as("user").await;

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(body.contains(r#"class="dark""#));
}

#[tokio::test]
async fn test_non_admin_cannot_open_product_form() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;

    let response = ctx.get("/admin/products/new").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(!body.contains("/admin/products/new"));
}

#[tokio::test]
async fn test_admin_sees_product_form() {
    let ctx = TestContext::new().await;
    ctx.login_as("admin").await;

    let response = ctx.get("/admin/products/new").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"enctype="multipart/form-data""#));

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(body.contains("/admin/products/new"));
}

#[tokio::test]
async fn test_logout_returns_to_guest() {
    let ctx = TestContext::new().await;
    ctx.login_as("user").await;

    let response = ctx.post_form("/auth/logout", &[]).await;
    assert_eq!(location(&response), "/");

    let body = ctx.get("/").await.text().await.unwrap();
    assert!(body.contains("You have been logged out."));
    assert_eq!(location(&ctx.get("/orders").await), "/auth/login");
}
