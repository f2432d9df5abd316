//! Hosted backend (auth + REST gateway + storage) configuration.

use serde::{Deserialize, Serialize};

/// Default storage bucket for listing photos.
fn default_bucket() -> String {
    String::from("listing-images")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key sent as the `apikey` header.
    #[serde(default)]
    pub anon_key: String,

    /// Storage bucket holding listing photos.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            bucket: default_bucket(),
        }
    }
}

impl BackendConfig {
    /// Check if the backend config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of required fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("url");
        }
        if self.anon_key.trim().is_empty() {
            missing.push("anon_key");
        }
        if self.bucket.trim().is_empty() {
            missing.push("bucket");
        }
        missing
    }

    /// Project URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Auth endpoint root (`{url}/auth/v1`).
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url())
    }

    /// REST gateway root (`{url}/rest/v1`).
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url())
    }

    /// Storage API root (`{url}/storage/v1`).
    #[must_use]
    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.base_url())
    }
}
