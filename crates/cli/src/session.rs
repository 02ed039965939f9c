//! Login state persisted between invocations.
//!
//! The file holds the bearer token, so it is created owner-readable only on
//! unix. It is removed on logout and whenever the API rejects the token.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wardrobe_core::Role;

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A logged-in identity as stored on disk.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub email: String,
    #[serde(default)]
    pub role: Role,
    token: String,
}

impl StoredSession {
    #[must_use]
    pub const fn new(email: String, role: Role, token: String) -> Self {
        Self { email, role, token }
    }

    /// Bearer token for authenticated calls.
    #[must_use]
    pub fn token(&self) -> SecretString {
        SecretString::from(self.token.clone())
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Session file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionFileError {
        SessionFileError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the stored session. A missing file means "not logged in".
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<StoredSession>, SessionFileError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| SessionFileError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Write the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, session: &StoredSession) -> Result<(), SessionFileError> {
        let json = serde_json::to_vec_pretty(session).map_err(|source| {
            SessionFileError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(&json).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Delete the session file. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool, SessionFileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_file() -> (tempfile::TempDir, SessionFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        (dir, file)
    }

    #[test]
    fn test_missing_file_is_logged_out() {
        let (_dir, file) = temp_file();
        assert!(file.load().unwrap().is_none());
        assert!(!file.clear().unwrap());
    }

    #[test]
    fn test_save_load_clear() {
        let (_dir, file) = temp_file();
        let session = StoredSession::new("a@b.co".to_string(), Role::Admin, "tok".to_string());
        file.save(&session).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.email, "a@b.co");
        assert!(loaded.role.is_admin());

        assert!(file.clear().unwrap());
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, file) = temp_file();
        fs::write(file.path(), "not json").unwrap();
        assert!(matches!(
            file.load(),
            Err(SessionFileError::Corrupt { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, file) = temp_file();
        let session = StoredSession::new("a@b.co".to_string(), Role::User, "tok".to_string());
        file.save(&session).unwrap();
        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = StoredSession::new("a@b.co".to_string(), Role::User, "secret".to_string());
        assert!(!format!("{session:?}").contains("secret"));
    }
}
