//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in shop account in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AuthSession, session_keys};

/// Extractor that requires a logged-in visitor.
///
/// If the visitor is not logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(auth): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.email)
/// }
/// ```
pub struct RequireSession(pub AuthSession);

/// Extractor that requires a logged-in admin.
///
/// Visitors who are not logged in are sent to the login page; logged-in
/// non-admins get 403.
pub struct RequireAdmin(pub AuthSession);

/// Error returned when authentication is required but missing or insufficient.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Logged in without the admin role.
    Forbidden,
    /// No session layer in front of the handler.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Only admins can add products").into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

async fn current_auth(parts: &Parts) -> Result<Option<AuthSession>, AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    Ok(session
        .get::<AuthSession>(session_keys::AUTH)
        .await
        .ok()
        .flatten())
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_auth(parts)
            .await?
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = current_auth(parts)
            .await?
            .ok_or(AuthRejection::RedirectToLogin)?;
        if !auth.is_admin() {
            tracing::warn!(email = %auth.email, "Non-admin tried to reach admin page");
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(auth))
    }
}

/// Helper to store the API identity in the session after login.
///
/// The session id is cycled to prevent fixation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_auth_session(
    session: &Session,
    auth: &AuthSession,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::AUTH, auth).await
}

/// Helper to clear the API identity from the session (logout or expired token).
///
/// The selection and preferences are kept.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_auth_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<AuthSession>(session_keys::AUTH).await?;
    Ok(())
}
