//! Session middleware configuration and typed session accessors.
//!
//! Sessions live in the in-process `MemoryStore`; the storefront keeps no
//! database of its own. A restart logs everyone out.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use wardrobe_core::{CatalogFilter, Selection};

use crate::config::StorefrontConfig;
use crate::models::{Flash, Preferences, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "wardrobe_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

// =============================================================================
// Selection
// =============================================================================

/// The visitor's selection set (empty when none is stored).
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_selection(session: &Session) -> SessionResult<Selection> {
    Ok(session
        .get::<Selection>(session_keys::SELECTION)
        .await?
        .unwrap_or_default())
}

/// Replace the stored selection set.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_selection(session: &Session, selection: &Selection) -> SessionResult<()> {
    session.insert(session_keys::SELECTION, selection).await
}

// =============================================================================
// Catalog filter
// =============================================================================

/// Last filter used on a listing page.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_filter(session: &Session) -> SessionResult<CatalogFilter> {
    Ok(session
        .get::<CatalogFilter>(session_keys::BROWSE_FILTER)
        .await?
        .unwrap_or_default())
}

/// Remember the filter so the navbar shows it on every page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_filter(session: &Session, filter: &CatalogFilter) -> SessionResult<()> {
    session.insert(session_keys::BROWSE_FILTER, filter).await
}

// =============================================================================
// Preferences
// =============================================================================

/// Display preferences (defaults when none are stored).
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_preferences(session: &Session) -> SessionResult<Preferences> {
    Ok(session
        .get::<Preferences>(session_keys::PREFERENCES)
        .await?
        .unwrap_or_default())
}

/// Store display preferences.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_preferences(session: &Session, preferences: Preferences) -> SessionResult<()> {
    session.insert(session_keys::PREFERENCES, preferences).await
}

// =============================================================================
// Flash
// =============================================================================

/// Queue a banner for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(session: &Session, flash: Flash) -> SessionResult<()> {
    session.insert(session_keys::FLASH, flash).await
}

/// Remove and return the pending banner.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_flash(session: &Session) -> SessionResult<Option<Flash>> {
    session.remove::<Flash>(session_keys::FLASH).await
}
