//! Session-related types.
//!
//! Everything the storefront remembers about a visitor lives in the session:
//! the API identity, the selection set, the last catalog filter, display
//! preferences, and a one-shot flash banner.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use wardrobe_core::{Email, Role};

/// Session-stored API identity.
///
/// The token is only handed out as a [`SecretString`] and never printed.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Email the visitor logged in with.
    pub email: Email,
    /// Role reported by the API at login.
    pub role: Role,
    token: String,
}

impl AuthSession {
    #[must_use]
    pub fn new(email: Email, role: Role, token: impl Into<String>) -> Self {
        Self {
            email,
            role,
            token: token.into(),
        }
    }

    /// Bearer token for API calls.
    #[must_use]
    pub fn token(&self) -> SecretString {
        SecretString::from(self.token.clone())
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Display preferences. Survive logout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Error,
}

impl FlashKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the logged-in API identity.
    pub const AUTH: &str = "auth";

    /// Key for the selection set.
    pub const SELECTION: &str = "selection";

    /// Key for the last catalog filter (search box and gender selector).
    pub const BROWSE_FILTER: &str = "browse_filter";

    /// Key for display preferences.
    pub const PREFERENCES: &str = "preferences";

    /// Key for the pending flash banner.
    pub const FLASH: &str = "flash";
}
