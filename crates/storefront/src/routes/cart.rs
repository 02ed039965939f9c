//! Cart route handlers.
//!
//! The cart is the selection set stored in the session. Nothing is sent to
//! the shop API until an order is placed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::catalog::find_product;
use wardrobe_core::{Price, ProductId, Selection};

use crate::api::{ApiClient, ApiError};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::session::{load_selection, push_flash, save_selection};
use crate::middleware::{PageContext, RequireSession};
use crate::models::{AuthSession, Flash};
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<ProductView>,
    /// Selected ids the catalog no longer lists.
    pub unavailable: usize,
    pub total: String,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            unavailable: 0,
            total: Price::default().display(),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len() + self.unavailable
    }
}

/// Resolve the selection against the current catalog.
///
/// Fetch failures other than an expired token yield an empty view and a
/// banner message.
pub(crate) async fn cart_view(
    api: &ApiClient,
    auth: &AuthSession,
    selection: &Selection,
) -> Result<(CartView, Option<String>)> {
    if selection.is_empty() {
        return Ok((CartView::empty(), None));
    }

    let catalog = match api.list_products(Some(&auth.token())).await {
        Ok(catalog) => catalog,
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch catalog for cart");
            return Ok((CartView::empty(), Some(e.user_message())));
        }
    };

    let found: Vec<_> = selection
        .ids()
        .iter()
        .filter_map(|id| find_product(&catalog, id))
        .collect();
    let total: Price = found.iter().map(|p| p.unit_price()).sum();

    Ok((
        CartView {
            unavailable: selection.len() - found.len(),
            items: found
                .into_iter()
                .map(|p| ProductView::new(p, api, selection))
                .collect(),
            total: total.display(),
        },
        None,
    ))
}

/// Only same-site paths made of visible ASCII are accepted as redirect
/// targets; anything else could not be sent back as a `Location` header.
pub(crate) fn safe_return_path(candidate: Option<&str>, fallback: &'static str) -> String {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub cart: CartView,
    pub error: Option<String>,
}

/// Display cart page.
#[instrument(skip(state, session, auth, ctx))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
    ctx: PageContext,
) -> Result<Response> {
    let selection = load_selection(&session).await?;
    let (cart, error) = cart_view(state.api(), &auth, &selection).await?;

    Ok(CartShowTemplate { ctx, cart, error }.into_response())
}

/// Add the product to the selection, or remove it if already selected.
#[instrument(skip(session, form), fields(product_id = %form.product_id))]
pub async fn toggle(session: Session, Form(form): Form<ToggleForm>) -> Result<Redirect> {
    let return_to = safe_return_path(form.return_to.as_deref(), "/cart");
    let product_id = form.product_id.trim();
    if product_id.is_empty() {
        tracing::debug!("Ignoring toggle without a product id");
        push_flash(&session, Flash::error("No product selected")).await?;
        return Ok(Redirect::to(&return_to));
    }

    let id = ProductId::new(product_id);
    let selection = load_selection(&session).await?;
    let toggled = selection.toggle(&id);
    save_selection(&session, &toggled).await?;

    let flash = if toggled.contains(&id) {
        add_breadcrumb("cart", "Selected product", Some(&[("product_id", id.as_str())]));
        Flash::success("Product added to cart!")
    } else {
        add_breadcrumb("cart", "Deselected product", Some(&[("product_id", id.as_str())]));
        Flash::info("Product removed from cart")
    };
    push_flash(&session, flash).await?;

    Ok(Redirect::to(&return_to))
}

/// Empty the selection.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    save_selection(&session, &Selection::new()).await?;
    push_flash(&session, Flash::info("Cart cleared")).await?;
    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::header;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::middleware::session::take_flash;
    use crate::models::FlashKind;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn toggle_form(product_id: &str, return_to: &str) -> Form<ToggleForm> {
        Form(ToggleForm {
            product_id: product_id.to_string(),
            return_to: Some(return_to.to_string()),
        })
    }

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(
            safe_return_path(Some("/products?q=tee"), "/cart"),
            "/products?q=tee"
        );
        assert_eq!(safe_return_path(Some("//evil.example"), "/cart"), "/cart");
        assert_eq!(
            safe_return_path(Some("https://evil.example"), "/cart"),
            "/cart"
        );
        assert_eq!(safe_return_path(Some("/\\evil.example"), "/cart"), "/cart");
        assert_eq!(safe_return_path(None, "/cart"), "/cart");
    }

    #[test]
    fn test_return_path_with_control_characters_falls_back() {
        assert_eq!(safe_return_path(Some("/a\nb"), "/"), "/");
        assert_eq!(safe_return_path(Some("/a\tb"), "/"), "/");
        assert_eq!(safe_return_path(Some("/caf\u{e9}"), "/"), "/");
        assert_eq!(safe_return_path(Some("/a b"), "/"), "/");
        assert_eq!(safe_return_path(Some("/products/t-shirt"), "/"), "/products/t-shirt");
    }

    #[tokio::test]
    async fn test_toggle_ignores_blank_product_id() {
        let session = session();
        let redirect = toggle(session.clone(), toggle_form("   ", "/products"))
            .await
            .unwrap();

        assert_eq!(location(redirect), "/products");
        assert!(load_selection(&session).await.unwrap().is_empty());
        let flash = take_flash(&session).await.unwrap().unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let session = session();
        toggle(session.clone(), toggle_form(" p1 ", "/products"))
            .await
            .unwrap();
        let selection = load_selection(&session).await.unwrap();
        assert!(selection.contains(&ProductId::new("p1")));

        let redirect = toggle(session.clone(), toggle_form("p1", "/a\nb"))
            .await
            .unwrap();
        assert_eq!(location(redirect), "/cart");
        assert!(load_selection(&session).await.unwrap().is_empty());
    }

    #[test]
    fn test_empty_cart_view() {
        let cart = CartView::empty();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total, "$0.00");
    }
}
