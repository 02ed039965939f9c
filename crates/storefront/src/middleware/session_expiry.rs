//! Ends the local session when the shop API rejects its token.
//!
//! Handlers do not clear the session themselves. They return
//! `ApiError::SessionExpired`, whose response carries a [`SessionExpired`]
//! extension; this middleware sees it and removes the stored identity.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use super::auth::clear_auth_session;
use crate::error::clear_sentry_user;

/// Response marker set when an authenticated API call came back 401.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

/// Middleware that clears the identity when a handler reports an expired token.
///
/// Must sit inside the session layer.
pub async fn session_expiry_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if response.extensions().get::<SessionExpired>().is_some() {
        match clear_auth_session(&session).await {
            Ok(()) => tracing::info!("Cleared expired session"),
            Err(e) => tracing::error!(error = %e, "Failed to clear expired session"),
        }
        clear_sentry_user();
    }

    response
}
