//! Session persistence.
//!
//! Load priority: keyring → `STEWARD_AUTH__SESSION` env → file
//! (`~/.steward/session.json`). Stores go to the keyring, falling back to the
//! file when no keyring is available.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::session::Session;

const DEFAULT_KEYRING_SERVICE: &str = "steward-cli";
const KEYRING_USER: &str = "supabase-session";
const SESSION_FILE_NAME: &str = "session.json";
const SESSION_ENV: &str = "STEWARD_AUTH__SESSION";

/// Where a loaded session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Keyring,
    Env,
    File,
}

impl SessionSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Session storage backed by the OS keychain with a file fallback.
#[derive(Debug, Clone)]
pub struct SessionStore {
    keyring_service: Option<String>,
    read_env: bool,
    file_path: PathBuf,
}

impl SessionStore {
    /// Store under the user's home directory.
    ///
    /// The keyring service defaults to `"steward-cli"`; override it with
    /// `STEWARD_KEYRING_SERVICE` to keep test runs away from real credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the home directory is unknown.
    pub fn default_location() -> Result<Self, AuthError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AuthError::SessionStoreError("home directory not found; cannot store session".into())
        })?;
        let service = std::env::var("STEWARD_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Ok(Self {
            keyring_service: Some(service),
            read_env: true,
            file_path: home.join(".steward").join(SESSION_FILE_NAME),
        })
    }

    /// File-only store at `path`; no keyring, no environment.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            read_env: false,
            file_path: path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Persist a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if both keyring and file storage fail.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::SessionStoreError(format!("serialize session: {e}")))?;

        if let Some(entry) = self.keyring_entry() {
            match entry.set_password(&json) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.save_file(&json)
    }

    /// Load the stored session, if any.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        self.load_with_source().map(|(session, _)| session)
    }

    /// Load the stored session along with the tier it came from.
    #[must_use]
    pub fn load_with_source(&self) -> Option<(Session, SessionSource)> {
        if let Some(entry) = self.keyring_entry()
            && let Ok(json) = entry.get_password()
            && let Some(session) = parse_session(&json, "keyring")
        {
            return Some((session, SessionSource::Keyring));
        }

        if self.read_env
            && let Ok(json) = std::env::var(SESSION_ENV)
            && let Some(session) = parse_session(&json, "env")
        {
            return Some((session, SessionSource::Env));
        }

        let json = fs::read_to_string(&self.file_path).ok()?;
        parse_session(&json, "file").map(|session| (session, SessionSource::File))
    }

    /// Delete the stored session from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the session file cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            let _ = entry.delete_credential();
        }

        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| {
                AuthError::SessionStoreError(format!(
                    "failed to delete {}: {e}",
                    self.file_path.display()
                ))
            })?;
        }
        Ok(())
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn save_file(&self, json: &str) -> Result<(), AuthError> {
        let path = &self.file_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, json)
            .map_err(|e| AuthError::SessionStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

fn parse_session(json: &str, source: &str) -> Option<Session> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(source, %error, "ignoring unreadable stored session");
            None
        }
    }
}
