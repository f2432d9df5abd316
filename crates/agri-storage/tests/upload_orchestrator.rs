//! Batch upload behaviour against the in-memory backend.

use std::time::Duration;

use agri_core::{AuthUser, Session};
use agri_storage::{
    CleanupPolicy, ImageLocator, MemoryStorage, StorageError, UploadOrchestrator,
};
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;

const BASE: &str = "https://cdn.test/listing-images";

fn session(owner: &str) -> Session {
    Session {
        access_token: "token".into(),
        refresh_token: "refresh".into(),
        expires_at: Utc::now() + TimeDelta::hours(1),
        user: AuthUser {
            id: owner.into(),
            email: None,
            full_name: None,
            farm_name: None,
        },
    }
}

fn images(names: &[&str]) -> Vec<ImageLocator> {
    names.iter().map(|name| ImageLocator::new(*name)).collect()
}

#[tokio::test]
async fn urls_follow_input_order_under_owner_folder() {
    let orchestrator = UploadOrchestrator::new(
        MemoryStorage::new(BASE).with_latency(Duration::from_millis(5)),
        CleanupPolicy::default(),
    );
    let input = images(&["/p/one.png", "/p/two", "file:///p/three.JPEG?v=2"]);

    let urls = orchestrator
        .upload_all(Some(&session("user-1")), &input)
        .await
        .expect("upload");

    assert_eq!(urls.len(), 3);
    assert!(urls.iter().all(|u| u.starts_with(&format!("{BASE}/user-1/"))));
    assert!(urls[0].ends_with(".png"));
    assert!(urls[1].ends_with(".jpg"));
    assert!(urls[2].ends_with(".jpeg"));
    assert_eq!(orchestrator.backend().keys().len(), 3);
}

#[tokio::test]
async fn empty_batch_yields_no_urls() {
    let orchestrator = UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::default());
    let urls = orchestrator
        .upload_all(Some(&session("user-1")), &[])
        .await
        .expect("upload");
    assert!(urls.is_empty());
}

#[tokio::test]
async fn missing_session_is_unauthenticated() {
    let orchestrator = UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::default());
    let err = orchestrator
        .upload_all(None, &images(&["/p/a.jpg"]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Unauthenticated));
    assert!(orchestrator.backend().keys().is_empty());
}

#[tokio::test]
async fn expired_session_is_unauthenticated() {
    let orchestrator = UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::default());
    let mut expired = session("user-1");
    expired.expires_at = Utc::now() - TimeDelta::minutes(1);

    let err = orchestrator
        .upload_all(Some(&expired), &images(&["/p/a.jpg"]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Unauthenticated));
}

#[tokio::test]
async fn failed_batch_is_removed_under_default_policy() {
    let backend = MemoryStorage::new(BASE)
        .failing_on("broken", || StorageError::Network("connection reset".into()));
    let orchestrator = UploadOrchestrator::new(backend, CleanupPolicy::RemoveUploaded);

    let err = orchestrator
        .upload_all(
            Some(&session("user-1")),
            &images(&["/p/a.jpg", "/p/broken.jpg", "/p/c.jpg"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Network(_)));
    assert!(orchestrator.backend().keys().is_empty());
    assert_eq!(orchestrator.backend().removed().len(), 3);
}

#[tokio::test]
async fn retain_policy_skips_cleanup() {
    let backend = MemoryStorage::new(BASE).failing_on("denied", || {
        StorageError::PermissionDenied {
            message: "policy".into(),
        }
    });
    let orchestrator = UploadOrchestrator::new(backend, CleanupPolicy::Retain);

    let err = orchestrator
        .upload_all(
            Some(&session("user-1")),
            &images(&["/p/a.jpg", "/p/denied.jpg"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::PermissionDenied { .. }));
    assert!(orchestrator.backend().removed().is_empty());
}

#[tokio::test]
async fn not_found_bucket_is_surfaced_as_is() {
    let backend = MemoryStorage::new(BASE).failing_on("", || StorageError::NotFound {
        bucket: "listing-images".into(),
    });
    let orchestrator = UploadOrchestrator::new(backend, CleanupPolicy::default());

    let err = orchestrator
        .upload_all(Some(&session("user-1")), &images(&["/p/a.jpg"]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { bucket } if bucket == "listing-images"));
}

#[tokio::test]
async fn discarding_a_batch_removes_its_keys() {
    let orchestrator = UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::default());
    let owner = session("user-1");

    let batch = orchestrator
        .upload_batch(Some(&owner), &images(&["/p/a.jpg", "/p/b.gif"]))
        .await
        .expect("upload");
    assert_eq!(batch.keys.len(), 2);
    assert_eq!(batch.urls[1], format!("{BASE}/{}", batch.keys[1]));

    orchestrator.discard(&owner, &batch).await;

    assert!(orchestrator.backend().keys().is_empty());
    assert_eq!(orchestrator.backend().removed(), batch.keys);
}
