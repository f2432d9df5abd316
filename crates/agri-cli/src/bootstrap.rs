use anyhow::Context;

use agri_config::AgriConfig;

/// Load `.env` (searched upward from the working directory), then the
/// layered config. A missing backend URL or key is fatal.
pub fn load_config() -> anyhow::Result<AgriConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    let config = AgriConfig::load().context("failed to load agrilink configuration")?;
    config.require_backend().context(
        "backend is not configured: set SUPABASE_URL and SUPABASE_ANON_KEY \
         (or AGRI_BACKEND__URL and AGRI_BACKEND__ANON_KEY)",
    )?;
    Ok(config)
}
