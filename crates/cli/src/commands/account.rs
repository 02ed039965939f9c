//! `wardrobe login`, `wardrobe register` and `wardrobe logout`.

use wardrobe_core::Email;
use wardrobe_storefront::api::{Credentials, Registration};

use super::{CliError, Context};
use crate::session::StoredSession;

fn parse_email(raw: &str) -> Result<Email, CliError> {
    Email::parse(raw).map_err(|e| CliError::Invalid(e.to_string()))
}

/// Log in and store the token.
///
/// # Errors
///
/// Returns an error for missing fields, bad credentials, or a failed write.
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CliError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(CliError::Invalid("Email and password required".to_string()));
    }
    let email = parse_email(email)?;

    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    let response = ctx
        .api
        .login(&credentials)
        .await
        .map_err(|e| ctx.api_error(e))?;

    let session = StoredSession::new(email.to_string(), response.role, response.token);
    ctx.session.save(&session)?;
    tracing::info!(role = %session.role, "Logged in");
    println!("Logged in as {} ({})", session.email, session.role);
    Ok(())
}

/// Create an account. Does not log in.
///
/// # Errors
///
/// Returns an error for missing fields or when the API refuses the account.
pub async fn register(
    ctx: &Context,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(CliError::Invalid("All fields are required".to_string()));
    }
    let email = parse_email(email)?;

    let registration = Registration {
        name: name.trim().to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    ctx.api
        .register(&registration)
        .await
        .map_err(|e| ctx.api_error(e))?;

    println!("Registration successful! Run `wardrobe login` to sign in.");
    Ok(())
}

/// Forget the stored login.
///
/// # Errors
///
/// Returns an error if the session file cannot be removed.
pub fn logout(ctx: &Context) -> Result<(), CliError> {
    if ctx.session.clear()? {
        println!("You have been logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
