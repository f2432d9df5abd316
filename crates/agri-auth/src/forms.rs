//! Client-side checks run before any auth request is sent.

use serde::Serialize;

use crate::error::AuthError;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email + password pair for sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trim the email and require both fields.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if either field is blank.
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput("please fill in all fields".into()));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Profile metadata stored on the user record at sign-up.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub full_name: String,
    pub farm_name: String,
}

/// A validated sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub credentials: Credentials,
    pub profile: ProfileMetadata,
}

impl SignUpRequest {
    /// Validate the sign-up form in the order the screen checked it:
    /// all fields present, terms accepted, password long enough.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` describing the first failed check.
    pub fn new(
        full_name: &str,
        farm_name: &str,
        email: &str,
        password: &str,
        agreed_to_terms: bool,
    ) -> Result<Self, AuthError> {
        if full_name.trim().is_empty()
            || farm_name.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
        {
            return Err(AuthError::InvalidInput("please fill in all fields".into()));
        }
        if !agreed_to_terms {
            return Err(AuthError::InvalidInput(
                "please agree to the terms of cultivation".into(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(Self {
            credentials: Credentials::new(email, password)?,
            profile: ProfileMetadata {
                full_name: full_name.trim().to_string(),
                farm_name: farm_name.trim().to_string(),
            },
        })
    }
}
