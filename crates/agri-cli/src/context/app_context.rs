use std::time::Duration;

use anyhow::Context;

use agri_auth::{AuthClient, AuthError, SessionContext, SessionStore};
use agri_config::AgriConfig;
use agri_core::Session;
use agri_insights::StaticMarketData;
use agri_listings::PostgrestListings;
use agri_storage::{CleanupPolicy, SupabaseStorage, UploadOrchestrator};

/// Shared application state for command handlers.
pub struct AppContext {
    pub config: AgriConfig,
    pub session: SessionContext<AuthClient>,
    pub uploader: UploadOrchestrator<SupabaseStorage>,
    pub listings: PostgrestListings,
    pub market: StaticMarketData,
}

impl AppContext {
    /// Build the backend clients and restore the persisted session.
    ///
    /// A refresh that fails in transit is logged and the run continues
    /// signed out; commands that need a session report it themselves.
    pub async fn init(config: AgriConfig) -> anyhow::Result<Self> {
        let backend = config
            .require_backend()
            .context("backend is not configured")?;
        let timeout = Duration::from_secs(config.general.request_timeout_secs);

        let auth = AuthClient::new(backend, timeout).context("failed to build auth client")?;
        let store = SessionStore::system().context("failed to open session store")?;
        let session = SessionContext::new(auth, store);

        let storage =
            SupabaseStorage::new(backend, timeout).context("failed to build storage client")?;
        let uploader = UploadOrchestrator::new(
            storage,
            CleanupPolicy::from_flag(config.general.cleanup_on_failure),
        );
        let listings =
            PostgrestListings::new(backend, timeout).context("failed to build listings client")?;

        if let Err(error) = session.restore().await {
            tracing::warn!(%error, "could not refresh stored session; continuing signed out");
        }

        Ok(Self {
            config,
            session,
            uploader,
            listings,
            market: StaticMarketData,
        })
    }

    /// The signed-in session, or an error telling the user to log in.
    pub fn require_session(&self) -> anyhow::Result<Session> {
        self.session.require_session().map_err(|error| match error {
            AuthError::NotAuthenticated => {
                anyhow::anyhow!("not logged in; run `agri auth login --email <EMAIL>` first")
            }
            AuthError::SessionExpired => {
                anyhow::anyhow!("session expired; run `agri auth login --email <EMAIL>` again")
            }
            other => other.into(),
        })
    }
}
