//! General client behavior.

use serde::{Deserialize, Serialize};

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_cleanup_on_failure() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Remove already-uploaded photos when a multi-photo upload fails.
    #[serde(default = "default_cleanup_on_failure")]
    pub cleanup_on_failure: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            cleanup_on_failure: default_cleanup_on_failure(),
        }
    }
}
