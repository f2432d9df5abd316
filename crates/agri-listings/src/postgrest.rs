//! Client for the `listings` table behind the REST gateway (`{url}/rest/v1`).

use std::time::Duration;

use agri_config::BackendConfig;
use agri_core::{Listing, ListingFields, Session};
use serde::Serialize;

use crate::error::ListingError;
use crate::repository::ListingRepository;

const TABLE: &str = "listings";

#[derive(Serialize)]
struct InsertRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    fields: &'a ListingFields,
}

pub struct PostgrestListings {
    http: reqwest::Client,
    rest_url: String,
    anon_key: String,
}

impl PostgrestListings {
    /// # Errors
    ///
    /// Returns `ListingError::Network` if the HTTP client cannot be built.
    pub fn new(backend: &BackendConfig, timeout: Duration) -> Result<Self, ListingError> {
        let http = reqwest::Client::builder()
            .user_agent("agrilink/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| ListingError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            rest_url: backend.rest_url(),
            anon_key: backend.anon_key.clone(),
        })
    }

    fn table_url(&self, filters: &[(&str, String)]) -> String {
        let mut url = format!("{}/{TABLE}", self.rest_url);
        for (i, (name, value)) in filters.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
    }
}

impl ListingRepository for PostgrestListings {
    async fn create(
        &self,
        session: &Session,
        fields: &ListingFields,
    ) -> Result<Listing, ListingError> {
        fields.check_invariants()?;
        let row = InsertRow {
            user_id: session.owner_id(),
            fields,
        };
        let url = self.table_url(&[]);
        tracing::debug!(%url, nomenclature = %fields.nomenclature, "inserting listing");

        let resp = self
            .request(reqwest::Method::POST, &url, session)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let mut rows: Vec<Listing> = resp.json().await?;
        if rows.is_empty() {
            return Err(ListingError::InvalidResponse(
                "insert returned no rows".into(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn list_by_owner(&self, session: &Session) -> Result<Vec<Listing>, ListingError> {
        let url = self.table_url(&[
            ("select", "*".into()),
            ("user_id", format!("eq.{}", session.owner_id())),
            ("order", "created_at.desc".into()),
        ]);
        let resp = self
            .request(reqwest::Method::GET, &url, session)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    async fn delete_by_id(&self, session: &Session, id: &str) -> Result<(), ListingError> {
        let url = self.table_url(&[
            ("id", format!("eq.{id}")),
            ("user_id", format!("eq.{}", session.owner_id())),
        ]);
        let resp = self
            .request(reqwest::Method::DELETE, &url, session)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ListingError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    if status == 401 {
        return Err(ListingError::Unauthenticated);
    }
    Err(ListingError::Persistence(gateway_message(&body)))
}

/// The gateway reports `{code, message, details, hint}`; keep message and details.
fn gateway_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let message = value.get("message").and_then(|m| m.as_str());
    let details = value.get("details").and_then(|d| d.as_str());
    match (message, details) {
        (Some(message), Some(details)) if !details.is_empty() => format!("{message} ({details})"),
        (Some(message), _) => message.to_string(),
        _ => body.trim().to_string(),
    }
}
