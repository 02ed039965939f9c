//! Per-request page context.
//!
//! Gathers what every page needs from the session: the logged-in identity,
//! the selection count, the navbar filter, the theme, and any pending flash.
//! Extracting it consumes the flash.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use wardrobe_core::{CatalogFilter, GenderFilter};

use crate::error::AppError;
use crate::models::{AuthSession, Flash, session_keys};

use super::session::{load_filter, load_preferences, load_selection, take_flash};

/// Session state handed to every template.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub auth: Option<AuthSession>,
    pub cart_count: usize,
    pub filter: CatalogFilter,
    pub dark_mode: bool,
    pub flash: Option<Flash>,
    /// Path and query of the current request, for forms that come back here.
    pub path: String,
}

/// A gender selector entry for the navbar.
#[derive(Debug, Clone)]
pub struct GenderOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl PageContext {
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.auth.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.auth.as_ref().is_some_and(AuthSession::is_admin)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.auth.as_ref().map_or("", |a| a.email.as_str())
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.filter.query()
    }

    #[must_use]
    pub fn gender_options(&self) -> Vec<GenderOption> {
        GenderFilter::OPTIONS
            .iter()
            .map(|&g| GenderOption {
                value: g.as_str(),
                label: match g {
                    GenderFilter::All => "All",
                    GenderFilter::Men => "Men",
                    GenderFilter::Women => "Women",
                },
                selected: g == self.filter.gender(),
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let auth = session.get::<AuthSession>(session_keys::AUTH).await?;
        let cart_count = load_selection(&session).await?.len();
        let filter = load_filter(&session).await?;
        let dark_mode = load_preferences(&session).await?.dark_mode;
        let flash = take_flash(&session).await?;
        let path = parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), ToString::to_string);

        Ok(Self {
            auth,
            cart_count,
            filter,
            dark_mode,
            flash,
            path,
        })
    }
}
