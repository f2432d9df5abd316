//! In-process storage backend.
//!
//! Keeps objects in a map and can be told to fail uploads whose locator
//! contains a given fragment, which is how workflow tests exercise the
//! partial-failure paths.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use agri_core::Session;

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::locator::ImageLocator;

type FailureFn = Box<dyn Fn() -> StorageError + Send + Sync>;

pub struct MemoryStorage {
    base_url: String,
    latency: Option<Duration>,
    failures: Vec<(String, FailureFn)>,
    objects: Mutex<BTreeMap<String, ImageLocator>>,
    removed: Mutex<Vec<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            latency: None,
            failures: Vec::new(),
            objects: Mutex::new(BTreeMap::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    /// Fail every upload whose locator contains `fragment`.
    #[must_use]
    pub fn failing_on(
        mut self,
        fragment: impl Into<String>,
        error: impl Fn() -> StorageError + Send + Sync + 'static,
    ) -> Self {
        self.failures.push((fragment.into(), Box::new(error)));
        self
    }

    /// Delay each upload, so tests can observe in-flight state.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Keys currently stored, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every key passed to `remove`, in call order.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        self.removed
            .lock()
            .map(|removed| removed.clone())
            .unwrap_or_default()
    }
}

impl StorageBackend for MemoryStorage {
    async fn upload(
        &self,
        session: &Session,
        key: &str,
        image: &ImageLocator,
    ) -> Result<(), StorageError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some((_, error)) = self
            .failures
            .iter()
            .find(|(fragment, _)| image.as_str().contains(fragment.as_str()))
        {
            return Err(error());
        }
        if !key.starts_with(&format!("{}/", session.owner_id())) {
            return Err(StorageError::PermissionDenied {
                message: format!("key '{key}' is outside the owner's folder"),
            });
        }
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Other("storage lock poisoned".into()))?;
        objects.insert(key.to_string(), image.clone());
        Ok(())
    }

    async fn remove(&self, _session: &Session, keys: &[String]) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Other("storage lock poisoned".into()))?;
        let mut removed = self
            .removed
            .lock()
            .map_err(|_| StorageError::Other("storage lock poisoned".into()))?;
        for key in keys {
            objects.remove(key);
            removed.push(key.clone());
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}
