use std::fs;
use std::path::{Path, PathBuf};

use agri_core::Session;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "agrilink-cli";
const KEYRING_USER: &str = "session";
const SESSION_FILE_NAME: &str = "session.json";

/// Persists the serialized session between runs.
///
/// Priority on load: keyring → file (`~/.agrilink/session.json`).
pub struct SessionStore {
    keyring_service: Option<String>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Store backed by the OS keychain with the default file fallback.
    ///
    /// The keyring service can be overridden via `AGRI_KEYRING_SERVICE`
    /// (e.g. `"agrilink-cli-test"`) to avoid touching real credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn system() -> Result<Self, AuthError> {
        let service = std::env::var("AGRI_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Ok(Self {
            keyring_service: Some(service),
            file_path: default_session_path()?,
        })
    }

    /// File-only store, used by tests and headless environments.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            file_path: path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Persist a session. Falls back to the file if the keyring is
    /// unavailable or does not read the value back.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let payload = serde_json::to_string(session)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;

        if let Some(service) = &self.keyring_service {
            match store_keyring(service, &payload) {
                Ok(()) => {
                    self.remove_file()?;
                    return Ok(());
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }

        self.write_file(&payload)
    }

    /// Load the persisted session, if any. Unreadable entries are treated
    /// as absent.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = self
            .keyring_service
            .as_deref()
            .and_then(load_keyring)
            .or_else(|| self.read_file())?;

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable stored session");
                None
            }
        }
    }

    /// Delete the persisted session from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session file cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
        {
            let _ = entry.delete_credential();
        }
        self.remove_file()
    }

    /// Which tier currently holds the session (for status display).
    #[must_use]
    pub fn source(&self) -> Option<&'static str> {
        if self.keyring_service.as_deref().and_then(load_keyring).is_some() {
            return Some("keyring");
        }
        if self.read_file().is_some() {
            return Some("file");
        }
        None
    }

    fn write_file(&self, payload: &str) -> Result<(), AuthError> {
        let path = &self.file_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, payload)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn read_file(&self) -> Option<String> {
        fs::read_to_string(&self.file_path)
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    fn remove_file(&self) -> Result<(), AuthError> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| {
                AuthError::TokenStoreError(format!(
                    "failed to delete {}: {e}",
                    self.file_path.display()
                ))
            })?;
        }
        Ok(())
    }
}

fn default_session_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".agrilink").join(SESSION_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found; cannot store session".into())
        })
}

/// Write to the keychain and read the value back through a fresh entry.
/// Platforms without a persistent backend fail the read-back.
fn store_keyring(service: &str, payload: &str) -> Result<(), AuthError> {
    let entry = keyring::Entry::new(service, KEYRING_USER)
        .map_err(|e| AuthError::TokenStoreError(e.to_string()))?;
    entry
        .set_password(payload)
        .map_err(|e| AuthError::TokenStoreError(e.to_string()))?;
    if load_keyring(service).as_deref() == Some(payload) {
        Ok(())
    } else {
        Err(AuthError::TokenStoreError(
            "keyring did not persist the session".into(),
        ))
    }
}

fn load_keyring(service: &str) -> Option<String> {
    keyring::Entry::new(service, KEYRING_USER)
        .ok()?
        .get_password()
        .ok()
        .filter(|s| !s.is_empty())
}
