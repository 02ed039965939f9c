//! Authentication route handlers.
//!
//! Handles login, registration and logout against the shop API. The API
//! issues the token; the storefront only keeps it in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wardrobe_core::Email;

use crate::api::{Credentials, Registration};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::session::push_flash;
use crate::middleware::{PageContext, clear_auth_session, set_auth_session};
use crate::models::{AuthSession, Flash};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

fn error_message(code: &str) -> String {
    match code {
        "session_expired" => "Your session has expired. Please log in again.",
        "login_required" => "Please log in to continue.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn success_message(code: &str) -> String {
    match code {
        "registered" => "Registration successful! Please log in.",
        _ => "Done.",
    }
    .to_string()
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(ctx: PageContext, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        ctx,
        email: String::new(),
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, ctx, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ctx: PageContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let rerender = |ctx: PageContext, email: String, error: String| {
        LoginTemplate {
            ctx,
            email,
            error: Some(error),
            success: None,
        }
        .into_response()
    };

    if form.email.trim().is_empty() || form.password.is_empty() {
        return Ok(rerender(
            ctx,
            form.email,
            "Email and password required".to_string(),
        ));
    }
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => return Ok(rerender(ctx, form.email, e.to_string())),
    };

    let credentials = Credentials {
        email: email.to_string(),
        password: form.password,
    };
    let response = match state.api().login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            if e.is_server_side() {
                tracing::error!(error = %e, "Login request failed");
            } else {
                tracing::info!(error = %e, "Login rejected");
            }
            return Ok(rerender(ctx, form.email, e.user_message()));
        }
    };

    let auth = AuthSession::new(email, response.role, response.token);
    set_auth_session(&session, &auth).await?;
    set_sentry_user(auth.email.as_str());
    tracing::info!(role = %auth.role, "Logged in");

    Ok(Redirect::to("/").into_response())
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    ctx: PageContext,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        ctx,
        name: String::new(),
        email: String::new(),
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission.
///
/// The account is created but not logged in; the visitor is sent to the
/// login page.
#[instrument(skip(state, ctx, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let rerender = |ctx: PageContext, form: RegisterForm, error: String| {
        RegisterTemplate {
            ctx,
            name: form.name,
            email: form.email,
            error: Some(error),
        }
        .into_response()
    };

    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        return rerender(ctx, form, "All fields are required".to_string());
    }
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => return rerender(ctx, form, e.to_string()),
    };

    let registration = Registration {
        name: form.name.trim().to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    };
    match state.api().register(&registration).await {
        Ok(()) => {
            tracing::info!("Registered new account");
            Redirect::to("/auth/login?success=registered").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            let message = e.user_message();
            rerender(ctx, form, message)
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Drops the identity; the selection and theme stay with the browser session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_auth_session(&session).await?;
    clear_sentry_user();
    push_flash(&session, Flash::info("You have been logged out.")).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_error_codes() {
        assert_eq!(
            error_message("session_expired"),
            "Your session has expired. Please log in again."
        );
        assert_eq!(
            error_message("<script>"),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            success_message("registered"),
            "Registration successful! Please log in."
        );
    }
}
