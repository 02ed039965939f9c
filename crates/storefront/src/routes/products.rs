//! Product route handlers.
//!
//! Every listing page fetches the full catalog from the shop API and filters
//! it locally with the navbar's search box and gender selector.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::catalog::{find_product, in_category};
use wardrobe_core::{
    CatalogFilter, Category, Gender, GenderFilter, Product, ProductId, Selection,
};

use crate::api::{ApiClient, ApiError};
use crate::error::{AppError, Result};
use crate::middleware::session::{load_filter, load_selection, save_filter};
use crate::middleware::{PageContext, RequireSession};
use crate::models::AuthSession;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: Option<&'static str>,
    pub gender: Option<&'static str>,
    pub sizes: String,
    pub colors: String,
    pub stock: u32,
    pub image_url: String,
    pub selected: bool,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, api: &ApiClient, selection: &Selection) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.unit_price().display(),
            category: product.category.map(Category::label),
            gender: product.gender.map(Gender::as_str),
            sizes: product.sizes.join(", "),
            colors: product.colors.join(", "),
            stock: product.stock,
            image_url: api.image_url(product.image.as_deref()),
            selected: selection.contains(&product.id),
        }
    }
}

/// Navbar filter as submitted in the query string.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub q: Option<String>,
    pub gender: Option<String>,
}

impl BrowseQuery {
    /// The filter to use: the submitted one, or the stored one when the
    /// navbar form was not submitted.
    fn resolve(&self, stored: CatalogFilter) -> CatalogFilter {
        if self.q.is_none() && self.gender.is_none() {
            return stored;
        }
        CatalogFilter::new(
            self.q.as_deref().unwrap_or(""),
            self.gender
                .as_deref()
                .map_or(GenderFilter::All, GenderFilter::parse),
        )
    }
}

/// Listing page template (all products and category pages).
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub action: String,
    pub products: Vec<ProductView>,
    pub error: Option<String>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub ctx: PageContext,
    pub product: ProductView,
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetch the catalog for a listing page.
///
/// An expired token aborts the page; any other failure becomes a banner
/// over an empty list.
async fn fetch_catalog(
    api: &ApiClient,
    auth: &AuthSession,
) -> Result<(Vec<Product>, Option<String>)> {
    match api.list_products(Some(&auth.token())).await {
        Ok(products) => Ok((products, None)),
        Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch catalog");
            Ok((Vec::new(), Some(e.user_message())))
        }
    }
}

/// Resolve the active filter and remember it for the navbar.
async fn active_filter(session: &Session, query: &BrowseQuery) -> Result<CatalogFilter> {
    let filter = query.resolve(load_filter(session).await?);
    save_filter(session, &filter).await?;
    Ok(filter)
}

fn visible(
    catalog: &[Product],
    filter: &CatalogFilter,
    api: &ApiClient,
    selection: &Selection,
) -> Vec<ProductView> {
    filter
        .apply(catalog)
        .into_iter()
        .map(|p| ProductView::new(p, api, selection))
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// All products.
#[instrument(skip(state, session, auth, ctx))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
    mut ctx: PageContext,
    Query(query): Query<BrowseQuery>,
) -> Result<Response> {
    let filter = active_filter(&session, &query).await?;
    let selection = load_selection(&session).await?;
    let (catalog, error) = fetch_catalog(state.api(), &auth).await?;

    let products = visible(&catalog, &filter, state.api(), &selection);
    ctx.filter = filter;

    Ok(ProductsIndexTemplate {
        ctx,
        title: "All Products".to_string(),
        action: "/products".to_string(),
        products,
        error,
    }
    .into_response())
}

/// Category page when `key` is a category slug, product detail otherwise.
#[instrument(skip(state, session, auth, ctx))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
    mut ctx: PageContext,
    Path(key): Path<String>,
    Query(query): Query<BrowseQuery>,
) -> Result<Response> {
    let selection = load_selection(&session).await?;

    if let Some(category) = Category::from_slug(&key) {
        let filter = active_filter(&session, &query).await?;
        let (catalog, error) = fetch_catalog(state.api(), &auth).await?;

        let products = visible(
            &in_category(&catalog, category),
            &filter,
            state.api(),
            &selection,
        );
        ctx.filter = filter;

        return Ok(ProductsIndexTemplate {
            ctx,
            title: category.plural().to_string(),
            action: format!("/products/{}", category.slug()),
            products,
            error,
        }
        .into_response());
    }

    // No single-product endpoint; look it up in the catalog.
    let catalog = state.api().list_products(Some(&auth.token())).await?;
    let id = ProductId::new(key);
    let product = find_product(&catalog, &id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        ctx,
        product: ProductView::new(product, state.api(), &selection),
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_without_params_keeps_stored_filter() {
        let stored = CatalogFilter::new("tee", GenderFilter::Men);
        let query = BrowseQuery {
            q: None,
            gender: None,
        };
        assert_eq!(query.resolve(stored.clone()), stored);
    }

    #[test]
    fn test_submitted_query_replaces_stored_filter() {
        let stored = CatalogFilter::new("tee", GenderFilter::Men);
        let query = BrowseQuery {
            q: Some("  ".to_string()),
            gender: Some("women".to_string()),
        };
        let filter = query.resolve(stored);
        assert!(filter.query().trim().is_empty());
        assert_eq!(filter.gender(), GenderFilter::Women);

        let query = BrowseQuery {
            q: Some("cap".to_string()),
            gender: None,
        };
        assert_eq!(query.resolve(CatalogFilter::default()).gender(), GenderFilter::All);
    }
}
