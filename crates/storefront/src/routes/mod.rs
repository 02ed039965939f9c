//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products (login required)
//! GET  /products               - All products (?q= search, ?gender= all|men|women)
//! GET  /products/:key          - Category page (t-shirt, shirt, pant, shoes, other)
//!                                or product detail
//!
//! # Cart
//! GET  /cart                   - Selected products with total
//! POST /cart/toggle            - Select / deselect a product
//! POST /cart/clear             - Empty the selection
//!
//! # Orders (login required)
//! POST /orders                 - Place order from the selection
//! GET  /orders                 - Order history
//!
//! # Checkout (login required)
//! GET  /checkout               - Mock payment form
//! POST /checkout               - Mock payment, then place order
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Admin (admin role required)
//! GET  /admin/products/new     - Add-product form
//! POST /admin/products         - Create product (multipart)
//!
//! # Preferences
//! POST /preferences/theme      - Toggle dark mode
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod preferences;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{key}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/toggle", post(cart::toggle))
        .route("/clear", post(cart::clear))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products/new", get(admin::new_product))
        .route(
            "/products",
            post(admin::create_product).layer(DefaultBodyLimit::max(admin::MAX_UPLOAD_BYTES)),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Orders
        .route("/orders", get(orders::index).post(orders::place))
        // Mock checkout
        .route("/checkout", get(checkout::show).post(checkout::pay))
        // Auth routes
        .nest("/auth", auth_routes())
        // Admin routes
        .nest("/admin", admin_routes())
        // Preferences
        .route("/preferences/theme", post(preferences::toggle_theme))
}
