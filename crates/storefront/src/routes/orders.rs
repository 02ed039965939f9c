//! Order route handlers.
//!
//! Placing an order sends the selection to the shop API. The selection is
//! cleared only after the API accepted the order.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::{CreatedOrder, Order, Selection};

use crate::api::{ApiClient, ApiError};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::session::{load_selection, push_flash, save_selection};
use crate::middleware::{PageContext, RequireSession};
use crate::models::{AuthSession, Flash};
use crate::state::AppState;

/// Outcome of submitting the selection.
#[derive(Debug)]
pub(crate) enum Submission {
    /// The API accepted the order; the selection has been cleared.
    Placed(CreatedOrder),
    /// Nothing was selected; no request was sent.
    Empty,
    /// The API or the network refused; the selection is untouched.
    Failed(String),
}

impl Submission {
    /// Banner describing the outcome.
    pub(crate) fn flash(&self) -> Flash {
        match self {
            Self::Placed(order) => match &order.warning {
                Some(warning) => Flash::info(format!("Order placed successfully! {warning}")),
                None => Flash::success("Order placed successfully!"),
            },
            Self::Empty => Flash::error("Select products first!"),
            Self::Failed(message) => Flash::error(message.clone()),
        }
    }
}

/// Submit the stored selection as an order.
///
/// # Errors
///
/// Returns `AppError::Api(ApiError::SessionExpired)` when the token was
/// rejected, and session errors. API refusals are a `Submission::Failed`.
pub(crate) async fn submit_selection(
    api: &ApiClient,
    session: &Session,
    auth: &AuthSession,
) -> Result<Submission> {
    let selection = load_selection(session).await?;
    if selection.is_empty() {
        return Ok(Submission::Empty);
    }

    match api.create_order(&auth.token(), &selection).await {
        Ok(order) => {
            save_selection(session, &Selection::new()).await?;
            add_breadcrumb("orders", "Placed order", None);
            tracing::info!(
                items = selection.len(),
                warning = order.warning.as_deref().unwrap_or(""),
                "Order placed"
            );
            Ok(Submission::Placed(order))
        }
        Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired.into()),
        Err(e) => {
            if e.is_server_side() {
                tracing::error!(error = %e, "Order submission failed");
            } else {
                tracing::warn!(error = %e, "Order rejected");
            }
            let message = match &e {
                ApiError::Rejected { status, message } => format!("Error {status}: {message}"),
                other => other.user_message(),
            };
            Ok(Submission::Failed(message))
        }
    }
}

// =============================================================================
// View Models
// =============================================================================

/// One product line of an order.
#[derive(Clone)]
pub struct OrderLineView {
    pub label: String,
    pub price: Option<String>,
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub lines: Vec<OrderLineView>,
    pub total: String,
    pub warning: Option<String>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            lines: order
                .products
                .iter()
                .map(|p| OrderLineView {
                    label: p.label().to_string(),
                    price: p.unit_price().map(|price| price.display()),
                })
                .collect(),
            total: order.total().display(),
            warning: order.warning.clone(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub ctx: PageContext,
    pub orders: Vec<OrderView>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Place an order from the selection.
#[instrument(skip(state, session, auth))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
) -> Result<Redirect> {
    let submission = submit_selection(state.api(), &session, &auth).await?;
    push_flash(&session, submission.flash()).await?;

    Ok(match submission {
        Submission::Placed(_) => Redirect::to("/orders"),
        Submission::Empty | Submission::Failed(_) => Redirect::to("/cart"),
    })
}

/// Order history.
#[instrument(skip(state, auth, ctx))]
pub async fn index(
    State(state): State<AppState>,
    RequireSession(auth): RequireSession,
    ctx: PageContext,
) -> Result<Response> {
    let (orders, error) = match state.api().list_orders(&auth.token()).await {
        Ok(orders) => (orders.iter().map(OrderView::from).collect(), None),
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch orders");
            (Vec::new(), Some(format!("Error fetching orders: {}", e.user_message())))
        }
    };

    Ok(OrdersIndexTemplate { ctx, orders, error }.into_response())
}
