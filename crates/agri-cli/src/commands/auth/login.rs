use serde::Serialize;

use agri_auth::AuthError;
use agri_publish::Alert;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::{alert, password};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    email: Option<String>,
    expires_at: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = password::resolve(args.password.as_deref())?;

    let spinner = Spinner::start("Signing in");
    let session = match ctx.session.sign_in(&args.email, &password).await {
        Ok(session) => session,
        Err(error) => {
            spinner.finish_err("Sign-in failed");
            return Err(alert::into_error(&login_alert(&error)));
        }
    };
    spinner.finish_clear();

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: session.user.id,
            email: session.user.email,
            expires_at: session.expires_at.to_rfc3339(),
        },
        flags.format,
    )
}

fn login_alert(error: &AuthError) -> Alert {
    match error {
        AuthError::InvalidInput(_) => Alert::new("Error", "Please fill in all fields"),
        AuthError::Rejected { message, .. } => Alert::new("Login Failed", message.clone()),
        other => Alert::new("Error", other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejected_credentials_show_provider_message() {
        let alert = login_alert(&AuthError::Rejected {
            status: 400,
            message: "Invalid login credentials".into(),
        });
        assert_eq!(alert, Alert::new("Login Failed", "Invalid login credentials"));
    }

    #[test]
    fn blank_fields_ask_to_fill_in() {
        let alert = login_alert(&AuthError::InvalidInput("email is required".into()));
        assert_eq!(alert.message, "Please fill in all fields");
    }
}
