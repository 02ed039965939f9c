//! Mock checkout.
//!
//! Collects card details, checks the form is complete, waits out a simulated
//! processing delay, then places the order like `POST /orders`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::checkout::PaymentDetails;

use crate::error::Result;
use crate::middleware::session::{load_selection, push_flash};
use crate::middleware::{PageContext, RequireSession};
use crate::models::Flash;
use crate::routes::cart::{CartView, cart_view};
use crate::routes::orders::{Submission, submit_selection};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub cart: CartView,
    pub cardholder: String,
    pub expiry: String,
    pub error: Option<String>,
}

/// Display the payment form.
#[instrument(skip(state, session, auth, ctx))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
    ctx: PageContext,
) -> Result<Response> {
    let selection = load_selection(&session).await?;
    if selection.is_empty() {
        push_flash(&session, Flash::error("Select products first!")).await?;
        return Ok(Redirect::to("/cart").into_response());
    }
    let (cart, error) = cart_view(state.api(), &auth, &selection).await?;

    Ok(CheckoutTemplate {
        ctx,
        cart,
        cardholder: String::new(),
        expiry: String::new(),
        error,
    }
    .into_response())
}

/// Take the mock payment and place the order.
///
/// An incomplete form re-renders without contacting the shop API.
#[instrument(skip_all)]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    RequireSession(auth): RequireSession,
    ctx: PageContext,
    Form(details): Form<PaymentDetails>,
) -> Result<Response> {
    let selection = load_selection(&session).await?;
    if selection.is_empty() {
        push_flash(&session, Submission::Empty.flash()).await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    if let Err(e) = details.validate() {
        tracing::info!(error = ?e, "Incomplete payment form");
        let (cart, _) = cart_view(state.api(), &auth, &selection).await?;
        return Ok(CheckoutTemplate {
            ctx,
            cart,
            cardholder: details.cardholder,
            expiry: details.expiry,
            error: Some(e.to_string()),
        }
        .into_response());
    }

    tokio::time::sleep(state.config().payment_delay).await;

    let submission = submit_selection(state.api(), &session, &auth).await?;
    let flash = match &submission {
        Submission::Placed(order) => {
            let receipt = format!(
                "Payment with card ending {} accepted.",
                details.last_four()
            );
            let placed = submission.flash();
            match &order.warning {
                Some(_) => Flash::info(format!("{receipt} {}", placed.message)),
                None => Flash::success(format!("{receipt} {}", placed.message)),
            }
        }
        Submission::Empty | Submission::Failed(_) => submission.flash(),
    };
    push_flash(&session, flash).await?;

    Ok(match submission {
        Submission::Placed(_) => Redirect::to("/orders"),
        Submission::Empty | Submission::Failed(_) => Redirect::to("/checkout"),
    }
    .into_response())
}
