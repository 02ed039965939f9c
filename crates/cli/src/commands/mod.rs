//! Subcommand implementations.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod orders;

use thiserror::Error;
use wardrobe_storefront::api::{ApiClient, ApiError};

use crate::session::{SessionFile, SessionFileError, StoredSession};

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", .0.user_message())]
    Api(ApiError),

    #[error(transparent)]
    SessionFile(#[from] SessionFileError),

    #[error("Not logged in. Run `wardrobe login` first.")]
    NotLoggedIn,

    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error("Only admins can add products")]
    Forbidden,

    #[error("{0}")]
    Invalid(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What every command works with.
pub struct Context {
    pub api: ApiClient,
    pub session: SessionFile,
}

impl Context {
    /// The stored login, or [`CliError::NotLoggedIn`].
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is logged in or the file is unreadable.
    pub fn require_session(&self) -> Result<StoredSession, CliError> {
        self.session.load()?.ok_or(CliError::NotLoggedIn)
    }

    /// Convert an API failure, forgetting the login if the token was rejected.
    #[must_use]
    pub fn api_error(&self, error: ApiError) -> CliError {
        match error {
            ApiError::SessionExpired => {
                match self.session.clear() {
                    Ok(_) => tracing::info!("Token rejected; session file removed"),
                    Err(e) => tracing::warn!(error = %e, "Could not remove session file"),
                }
                CliError::SessionExpired
            }
            other => {
                if other.is_server_side() {
                    tracing::error!(error = %other, "API request failed");
                }
                CliError::Api(other)
            }
        }
    }
}
