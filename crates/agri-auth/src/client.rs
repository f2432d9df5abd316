//! HTTP client for the hosted password auth endpoints (`{url}/auth/v1`).

use std::time::Duration;

use agri_config::BackendConfig;
use agri_core::{AuthUser, Session};
use serde::Deserialize;

use crate::error::AuthError;
use crate::forms::{Credentials, SignUpRequest};
use crate::provider::{AuthProvider, SignUpOutcome};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: UserRecord,
}

#[derive(Deserialize)]
struct UserRecord {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
    farm_name: Option<String>,
}

impl From<UserRecord> for AuthUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            full_name: record.user_metadata.full_name,
            farm_name: record.user_metadata.farm_name,
        }
    }
}

/// Auth endpoint client authenticated with the project's public key.
pub struct AuthClient {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if the HTTP client cannot be built.
    pub fn new(backend: &BackendConfig, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent("agrilink/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            auth_url: backend.auth_url(),
            anon_key: backend.anon_key.clone(),
        })
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, AuthError> {
        let url = format!("{}/{path}", self.auth_url);
        tracing::debug!(%url, "auth request");
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }
}

impl AuthProvider for AuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let value = self.post_json("token?grant_type=password", &body).await?;
        parse_session(value)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let body = serde_json::json!({
            "email": request.credentials.email,
            "password": request.credentials.password,
            "data": request.profile,
        });
        let value = self.post_json("signup", &body).await?;
        parse_sign_up(value)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let value = self.post_json("token?grant_type=refresh_token", &body).await?;
        parse_session(value)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = format!("{}/logout", self.auth_url);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

/// Map a non-success status to [`AuthError::Rejected`] with the provider's
/// human-readable message.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::Rejected {
        status,
        message: provider_message(&body),
    })
}

/// Pull the most specific message out of an auth error body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

fn parse_session(value: serde_json::Value) -> Result<Session, AuthError> {
    let token: TokenResponse = serde_json::from_value(value)
        .map_err(|e| AuthError::InvalidResponse(format!("session payload: {e}")))?;

    let expires_at = match (token.expires_at, token.expires_in) {
        (Some(at), _) => chrono::DateTime::from_timestamp(at, 0)
            .ok_or_else(|| AuthError::InvalidResponse("invalid expires_at".into()))?,
        (None, Some(secs)) => chrono::Utc::now() + chrono::TimeDelta::seconds(secs),
        (None, None) => crate::jwt::decode_expiry(&token.access_token)?,
    };

    Ok(Session {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at,
        user: token.user.into(),
    })
}

fn parse_sign_up(value: serde_json::Value) -> Result<SignUpOutcome, AuthError> {
    if value.get("access_token").is_some_and(serde_json::Value::is_string) {
        return parse_session(value).map(SignUpOutcome::SignedIn);
    }

    let user_value = match value.get("user") {
        Some(user) if user.is_object() => user.clone(),
        _ => value,
    };
    let record: UserRecord = serde_json::from_value(user_value)
        .map_err(|e| AuthError::InvalidResponse(format!("sign-up payload: {e}")))?;
    Ok(SignUpOutcome::ConfirmationRequired(record.into()))
}
