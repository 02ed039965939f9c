//! Visitor preferences.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::session::{load_preferences, save_preferences};
use crate::routes::cart::safe_return_path;

/// Theme toggle form data.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub return_to: Option<String>,
}

/// Flip dark mode and go back to the page the toggle was on.
#[instrument(skip(session))]
pub async fn toggle_theme(session: Session, Form(form): Form<ThemeForm>) -> Result<Redirect> {
    let mut preferences = load_preferences(&session).await?;
    preferences.dark_mode = !preferences.dark_mode;
    save_preferences(&session, preferences).await?;
    tracing::debug!(dark_mode = preferences.dark_mode, "Theme toggled");

    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref(), "/")))
}
