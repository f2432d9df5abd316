//! # agri-config
//!
//! Layered configuration loading for Agrilink using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AGRI_*` prefix, `__` as separator)
//! 2. `SUPABASE_URL` / `SUPABASE_ANON_KEY` aliases for the backend section
//! 3. Project-level `.agrilink/config.toml`
//! 4. User-level `~/.config/agrilink/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AGRI_BACKEND__URL` -> `backend.url`,
//! `AGRI_GENERAL__REQUEST_TIMEOUT_SECS` -> `general.request_timeout_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use agri_config::AgriConfig;
//!
//! let config = AgriConfig::load_with_dotenv().expect("config");
//! let backend = config.require_backend().expect("backend must be configured");
//! println!("backend: {}", backend.url);
//! ```

mod backend;
mod error;
mod general;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AgriConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AgriConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".agrilink/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment = figment.merge(
            Env::raw()
                .only(&["SUPABASE_URL", "SUPABASE_ANON_KEY"])
                .map(|key| {
                    key.as_str()
                        .to_ascii_lowercase()
                        .replacen("supabase_", "backend.", 1)
                        .into()
                }),
        );

        figment.merge(Env::prefixed("AGRI_").split("__"))
    }

    /// Return the backend section, or fail if the service URL or public key
    /// is missing. Callers treat this error as fatal at startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when a required field is empty,
    /// or [`ConfigError::InvalidValue`] when the URL has no http(s) scheme.
    pub fn require_backend(&self) -> Result<&BackendConfig, ConfigError> {
        if !self.backend.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "backend".into(),
                missing: self.backend.missing_fields().join(", "),
            });
        }
        if !(self.backend.url.starts_with("https://") || self.backend.url.starts_with("http://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "backend.url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.backend.url),
            });
        }
        Ok(&self.backend)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agrilink").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_configured() {
        let config = AgriConfig::default();
        assert!(!config.backend.is_configured());
        assert_eq!(config.backend.bucket, "listing-images");
        assert_eq!(config.general.request_timeout_secs, 30);
    }

    #[test]
    fn require_backend_fails_on_defaults() {
        let config = AgriConfig::default();
        let err = config.require_backend().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { .. }));
        assert!(err.to_string().contains("url"));
        assert!(err.to_string().contains("anon_key"));
    }

    #[test]
    fn require_backend_rejects_schemeless_url() {
        let config = AgriConfig {
            backend: BackendConfig {
                url: "example.supabase.co".into(),
                anon_key: "anon".into(),
                ..BackendConfig::default()
            },
            ..AgriConfig::default()
        };
        let err = config.require_backend().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
