//! Client for the hosted storage API (`{url}/storage/v1`).

use std::time::Duration;

use agri_config::BackendConfig;
use agri_core::Session;

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::key::content_type;
use crate::locator::ImageLocator;

pub struct SupabaseStorage {
    http: reqwest::Client,
    storage_url: String,
    anon_key: String,
    bucket: String,
}

impl SupabaseStorage {
    /// Build a client for the configured backend and bucket.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Other` if the HTTP client cannot be built.
    pub fn new(backend: &BackendConfig, timeout: Duration) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .user_agent("agrilink/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            storage_url: backend.storage_url(),
            anon_key: backend.anon_key.clone(),
            bucket: backend.bucket.clone(),
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket, encode_key(key))
    }
}

impl StorageBackend for SupabaseStorage {
    async fn upload(
        &self,
        session: &Session,
        key: &str,
        image: &ImageLocator,
    ) -> Result<(), StorageError> {
        let path = image.path();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StorageError::Io { path, source })?;
        tracing::debug!(key, size = bytes.len(), "uploading image");

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(image.file_name().to_string())
            .mime_str(content_type(key))
            .map_err(|e| StorageError::Other(format!("invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(self.object_url(key))
            .header("apikey", &self.anon_key)
            .header("x-upsert", "false")
            .bearer_auth(&session.access_token)
            .multipart(form)
            .send()
            .await?;
        check_response(resp, &self.bucket).await?;
        Ok(())
    }

    async fn remove(&self, session: &Session, keys: &[String]) -> Result<(), StorageError> {
        if keys.is_empty() {
            return Ok(());
        }
        let url = format!("{}/object/{}", self.storage_url, self.bucket);
        let resp = self
            .http
            .delete(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await?;
        check_response(resp, &self.bucket).await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url,
            self.bucket,
            encode_key(key)
        )
    }
}

/// Percent-encode each segment of an object key, keeping the separators.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Classify a non-success storage response.
///
/// The storage gateway sometimes reports policy failures as `400` with the
/// real status in the body's `statusCode` field, so both are consulted.
async fn check_response(
    resp: reqwest::Response,
    bucket: &str,
) -> Result<reqwest::Response, StorageError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();

    let embedded_status = parsed
        .as_ref()
        .and_then(|v| v.get("statusCode"))
        .and_then(|v| match v {
            serde_json::Value::String(s) => s.parse::<u16>().ok(),
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            _ => None,
        });
    let message = parsed
        .as_ref()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string());

    Err(match embedded_status.unwrap_or(status) {
        401 => StorageError::Unauthenticated,
        403 => StorageError::PermissionDenied { message },
        404 => StorageError::NotFound {
            bucket: bucket.to_string(),
        },
        _ => StorageError::Api { status, message },
    })
}
