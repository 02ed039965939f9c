//! End-to-end tests for the Wardrobe storefront.
//!
//! Each test starts the real router on an ephemeral port in front of a
//! `wiremock` shop API and drives it with a cookie-keeping HTTP client, the
//! way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wardrobe-integration-tests
//! ```

use std::time::Duration;

use reqwest::{Client, Response, header};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wardrobe_storefront::app;
use wardrobe_storefront::config::{ApiConfig, StorefrontConfig};
use wardrobe_storefront::state::AppState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer token handed out by the mocked login endpoint.
pub const TOKEN: &str = "test-token";

/// A running storefront, its mocked shop API and a browser-like client.
pub struct TestContext {
    pub shop: MockServer,
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start the storefront against a fresh mock shop API.
    ///
    /// # Panics
    ///
    /// Panics if the listener or the client cannot be created.
    pub async fn new() -> Self {
        let shop = MockServer::start().await;
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let base_url = format!("http://{addr}");

        let config = StorefrontConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: base_url.clone(),
            api: ApiConfig::from_base(&format!("{}/api", shop.uri()))
                .expect("Mock server URI is a valid API base"),
            payment_delay: Duration::ZERO,
            sentry_dsn: None,
            sentry_environment: None,
        };
        let router = app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            shop,
            client,
            base_url,
        }
    }

    /// `GET` a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request failed")
    }

    /// `POST` an urlencoded form to a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Mock the shop's login endpoint and log in with the given role.
    ///
    /// # Panics
    ///
    /// Panics if the storefront does not redirect home after login.
    pub async fn login_as(&self, role: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "message": "Login successful",
                    "token": TOKEN,
                    "role": role
                })),
            )
            .mount(&self.shop)
            .await;

        let response = self
            .post_form(
                "/auth/login",
                &[("email", "ada@example.com"), ("password", "secret")],
            )
            .await;
        assert_eq!(location(&response), "/", "login should redirect home");
    }

    /// Serve `products` from `GET /api/products`.
    pub async fn mount_catalog(&self, products: Value) {
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products))
            .mount(&self.shop)
            .await;
    }
}

/// Two-product catalog used across tests.
#[must_use]
pub fn sample_catalog() -> Value {
    json!([
        {
            "_id": "1",
            "name": "Red Tee",
            "description": "Cotton tee",
            "price": 10,
            "category": "T-shirt",
            "gender": "men",
            "sizes": ["M"],
            "colors": ["Red"],
            "stock": 5,
            "image": "/api/products/uploads/red.png"
        },
        {
            "_id": "2",
            "name": "Blue Tee",
            "description": "Linen tee",
            "price": 12.5,
            "category": "T-shirt",
            "gender": "women",
            "sizes": ["S"],
            "colors": ["Blue"],
            "stock": 3
        }
    ])
}

/// The `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
