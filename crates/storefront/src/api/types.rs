//! Request and response bodies of the shop API that are not part of the
//! catalog domain.

use serde::{Deserialize, Serialize};
use wardrobe_core::{Product, Role};

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login.
///
/// A missing or null role means a regular user.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .field("message", &self.message)
            .finish()
    }
}

/// `GET /products` answers either a list or `{"message": "..."}` when the
/// catalog is empty.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductListResponse {
    Products(Vec<Product>),
    Empty {
        #[allow(dead_code)]
        message: String,
    },
}

impl From<ProductListResponse> for Vec<Product> {
    fn from(response: ProductListResponse) -> Self {
        match response {
            ProductListResponse::Products(products) => products,
            ProductListResponse::Empty { .. } => Self::new(),
        }
    }
}

/// Error body the API sends with 4xx/5xx answers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.message).or(self.msg)
    }
}

/// An image attached to a new product.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
