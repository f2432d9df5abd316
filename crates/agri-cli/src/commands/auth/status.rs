use serde::Serialize;

use agri_auth::AuthState;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    backend: String,
    user_id: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    farm_name: Option<String>,
    expires_at: Option<String>,
    session_source: Option<&'static str>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let backend = ctx.config.backend.base_url().to_string();
    let status = match ctx.session.state() {
        AuthState::SignedIn(session) => AuthStatusResponse {
            authenticated: !session.is_expired(),
            backend,
            display_name: Some(session.user.display_name()),
            user_id: Some(session.user.id),
            email: session.user.email,
            farm_name: session.user.farm_name,
            expires_at: Some(session.expires_at.to_rfc3339()),
            session_source: ctx.session.store().source(),
        },
        AuthState::Loading | AuthState::SignedOut => AuthStatusResponse {
            authenticated: false,
            backend,
            user_id: None,
            email: None,
            display_name: None,
            farm_name: None,
            expires_at: None,
            session_source: None,
        },
    };

    output(&status, flags.format)
}
