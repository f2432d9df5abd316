use serde::Serialize;

use agri_auth::{AuthError, SignUpOutcome, SignUpRequest};
use agri_publish::Alert;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthSignupArgs;
use crate::commands::shared::{alert, password};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct AuthSignupResponse {
    user_id: String,
    email: Option<String>,
    signed_in: bool,
    message: &'static str,
}

pub async fn handle(
    args: &AuthSignupArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = password::resolve(args.password.as_deref())?;
    let request = SignUpRequest::new(
        &args.full_name,
        &args.farm_name,
        &args.email,
        &password,
        args.agree_terms,
    )
    .map_err(|error| alert::into_error(&signup_alert(&error)))?;

    let spinner = Spinner::start("Creating account");
    let outcome = match ctx.session.sign_up(&request).await {
        Ok(outcome) => outcome,
        Err(error) => {
            spinner.finish_err("Sign-up failed");
            return Err(alert::into_error(&signup_alert(&error)));
        }
    };
    spinner.finish_clear();

    let response = match outcome {
        SignUpOutcome::SignedIn(session) => AuthSignupResponse {
            user_id: session.user.id,
            email: session.user.email,
            signed_in: true,
            message: "Account created! You are now signed in.",
        },
        SignUpOutcome::ConfirmationRequired(user) => AuthSignupResponse {
            user_id: user.id,
            email: user.email,
            signed_in: false,
            message: "Please check your email to confirm your account, then log in.",
        },
    };
    output(&response, flags.format)
}

fn signup_alert(error: &AuthError) -> Alert {
    match error {
        AuthError::InvalidInput(message) => Alert::new("Error", message.clone()),
        AuthError::Rejected { message, .. } => Alert::new("Signup Failed", message.clone()),
        other => Alert::new("Error", other.to_string()),
    }
}
