//! Client for the remote shop API.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; the shop API owns all data
//! - No caching and no retries: every failure is reported to the caller
//! - Responses are decoded into explicit serde schemas so a malformed body
//!   fails here instead of deep inside a template
//! - Authenticated calls carry `Authorization: Bearer <token>`; a 401 on such
//!   a call is reported as [`ApiError::SessionExpired`]
//!
//! # Endpoints
//!
//! | Method | Path             | Auth   |
//! |--------|------------------|--------|
//! | GET    | `/products`      | optional |
//! | POST   | `/products`      | admin (multipart) |
//! | POST   | `/orders`        | bearer |
//! | GET    | `/orders`        | bearer |
//! | POST   | `/auth/login`    | none   |
//! | POST   | `/auth/register` | none   |

mod types;

pub use types::{Credentials, ImageUpload, LoginResponse, Registration};

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use wardrobe_core::catalog::OrderRequest;
use wardrobe_core::{CreatedOrder, NewProduct, Order, Product, Selection};

use crate::config::ApiConfig;
use types::{ErrorBody, ProductListResponse};

/// Image shown for products without an uploaded picture.
pub const PLACEHOLDER_IMAGE: &str = "/api/products/uploads/placeholder.png";

/// Errors that can occur when talking to the shop API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got an HTTP answer.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An authenticated call was answered with 401.
    #[error("session expired")]
    SessionExpired,

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The body did not match the expected schema.
    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Text suitable for a banner shown to the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the shop. Please try again.".to_string(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Decode { .. } | Self::Url(_) => {
                "The shop sent an unexpected response.".to_string()
            }
        }
    }

    /// Whether the failure is the API's or the network's fault rather than
    /// the visitor's.
    #[must_use]
    pub const fn is_server_side(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Decode { .. } | Self::Url(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::SessionExpired => false,
        }
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the shop API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                config: config.clone(),
            }),
        }
    }

    /// Base URL the endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }

    /// Absolute URL for a product image, or the placeholder when missing.
    #[must_use]
    pub fn image_url(&self, image: Option<&str>) -> String {
        let path = image
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE);
        self.inner.config.asset_url(path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.config.base_url.join(path)?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full catalog.
    ///
    /// An API answer of `{"message": "..."}` is the empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is neither a product
    /// list nor an empty-catalog message.
    #[instrument(skip(self, token))]
    pub async fn list_products(
        &self,
        token: Option<&SecretString>,
    ) -> Result<Vec<Product>, ApiError> {
        let mut request = self.inner.client.get(self.endpoint("products")?);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response: ProductListResponse =
            self.read(request, token.is_some(), "product list").await?;
        let products = Vec::from(response);
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Create a product from the admin form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the token is rejected, or the
    /// API refuses the product.
    #[instrument(skip(self, token, product, image), fields(name = %product.name))]
    pub async fn create_product(
        &self,
        token: &SecretString,
        product: &NewProduct,
        image: Option<ImageUpload>,
    ) -> Result<Product, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in product.form_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = image {
            let mut part = reqwest::multipart::Part::bytes(image.bytes).file_name(image.file_name);
            if let Some(content_type) = image.content_type {
                part = part.mime_str(&content_type)?;
            }
            form = form.part("image", part);
        }

        let request = self
            .inner
            .client
            .post(self.endpoint("products")?)
            .bearer_auth(token.expose_secret())
            .multipart(form);
        self.read(request, true, "created product").await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit the selection as an order.
    ///
    /// Any 2xx answer counts as success.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session has expired, or the
    /// API rejects the order.
    #[instrument(skip(self, token, selection), fields(items = selection.len()))]
    pub async fn create_order(
        &self,
        token: &SecretString,
        selection: &Selection,
    ) -> Result<CreatedOrder, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("orders")?)
            .bearer_auth(token.expose_secret())
            .json(&OrderRequest::from(selection));
        self.read(request, true, "created order").await
    }

    /// Order history of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session has expired.
    #[instrument(skip(self, token))]
    pub async fn list_orders(&self, token: &SecretString) -> Result<Vec<Order>, ApiError> {
        let request = self
            .inner
            .client
            .get(self.endpoint("orders")?)
            .bearer_auth(token.expose_secret());
        self.read(request, true, "order list").await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a token and role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the API's message for bad credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("auth/login")?)
            .json(credentials);
        self.read(request, false, "login").await
    }

    /// Create an account. The visitor logs in separately afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the API's message, e.g. when the
    /// email is already registered.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("auth/register")?)
            .json(registration);
        let _: serde_json::Value = self.read(request, false, "registration").await?;
        Ok(())
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Send `request` and decode a successful body as `T`.
    async fn read<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED && authenticated {
            debug!(context, "Token rejected");
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            tracing::warn!(
                status = %status,
                context,
                message = %message,
                "Shop API returned non-success status"
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(
                error = %source,
                context,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode shop API response"
            );
            ApiError::Decode { context, source }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wardrobe_core::{Gender, ProductId, Role};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::from_base(&format!("{}/api", server.uri())).unwrap();
        ApiClient::new(&config)
    }

    fn token() -> SecretString {
        SecretString::from("tok-123")
    }

    fn tee_json() -> serde_json::Value {
        json!({
            "_id": "p1",
            "name": "Red Tee",
            "description": "Cotton",
            "price": 19.99,
            "category": "T-Shirt",
            "gender": "men",
            "sizes": ["M", "L"],
            "colors": ["Red"],
            "stock": 4,
            "image": "/api/products/uploads/tee.png"
        })
    }

    #[tokio::test]
    async fn test_list_products_decodes_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([tee_json()])))
            .mount(&server)
            .await;

        let products = client_for(&server).await.list_products(None).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new("p1"));
        assert_eq!(products[0].gender, Some(Gender::Men));
    }

    #[tokio::test]
    async fn test_list_products_message_is_empty_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "No products available"})),
            )
            .mount(&server)
            .await;

        let products = client_for(&server).await.list_products(None).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_list_products_wrong_shape_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "No id"}])))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_products(None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { context: "product list", .. }));
    }

    #[tokio::test]
    async fn test_create_order_sends_bearer_and_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .and(header("Authorization", "Bearer tok-123"))
            .and(body_json(json!({"product_ids": ["p1", "p2"]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "o1",
                "user_id": "ada@example.com",
                "products": ["p1"],
                "warning": "1 invalid product ID(s) were ignored."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let selection: Selection = [ProductId::new("p1"), ProductId::new("p2")]
            .into_iter()
            .collect();
        let order = client_for(&server)
            .await
            .create_order(&token(), &selection)
            .await
            .unwrap();
        assert_eq!(
            order.warning.as_deref(),
            Some("1 invalid product ID(s) were ignored.")
        );
    }

    #[tokio::test]
    async fn test_authenticated_401_is_session_expired() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"msg": "Token has expired"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_orders(&token())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }

    #[tokio::test]
    async fn test_order_validation_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "No valid products found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_order(&token(), &Selection::new().toggle(&ProductId::new("x")))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "No valid products found");
        assert!(!err.is_server_side());
    }

    #[tokio::test]
    async fn test_login_401_is_rejection_not_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": "Invalid email or password"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_decodes_role() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "root@example.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "jwt",
                "role": "admin",
                "message": "Login successful"
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .await
            .login(&Credentials {
                email: "root@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.role, Role::Admin);
        assert!(!format!("{response:?}").contains("jwt"));
    }

    #[tokio::test]
    async fn test_register_accepts_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "User registered successfully",
                "token": "jwt",
                "role": "user"
            })))
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .register(&Registration {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_product_is_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(201).set_body_json(tee_json()))
            .expect(1)
            .mount(&server)
            .await;

        let form = wardrobe_core::catalog::NewProductForm {
            name: "Red Tee".into(),
            description: "Cotton".into(),
            price: "19.99".into(),
            stock: "4".into(),
            category: "T-Shirt".into(),
            gender: "men".into(),
            sizes: "M,L".into(),
            colors: "Red".into(),
        };
        let product = NewProduct::from_form(&form).unwrap();
        let image = ImageUpload {
            file_name: "tee.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };

        let created = client_for(&server)
            .await
            .create_product(&token(), &product, Some(image))
            .await
            .unwrap();
        assert_eq!(created.name, "Red Tee");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn test_image_url_uses_placeholder() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        assert_eq!(
            client.image_url(None),
            format!("{}{PLACEHOLDER_IMAGE}", server.uri())
        );
        assert_eq!(
            client.image_url(Some("/api/products/uploads/tee.png")),
            format!("{}/api/products/uploads/tee.png", server.uri())
        );
    }
}
