use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Create an account.
    Signup(AuthSignupArgs),
    /// Sign out and clear the stored session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub farm_name: String,
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
    /// Agree to the terms of cultivation.
    #[arg(long)]
    pub agree_terms: bool,
}
