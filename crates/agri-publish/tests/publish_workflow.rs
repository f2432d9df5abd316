//! End-to-end publish scenarios against in-memory storage and repository.

use std::time::Duration;

use agri_core::{AuthUser, Listing, ListingFields, MAX_IMAGES, Session};
use agri_listings::{ListingError, ListingRepository, MemoryListings};
use agri_publish::{
    Alert, ComposerState, ImageSource, ListingComposer, PublishError, ValidationError,
};
use agri_storage::{CleanupPolicy, ImageLocator, MemoryStorage, StorageError, UploadOrchestrator};
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;

const BASE: &str = "https://cdn.test/listing-images";

fn session() -> Session {
    Session {
        access_token: "token".into(),
        refresh_token: "refresh".into(),
        expires_at: Utc::now() + TimeDelta::hours(1),
        user: AuthUser {
            id: "farmer-1".into(),
            email: Some("ann@farm.test".into()),
            full_name: None,
            farm_name: None,
        },
    }
}

/// Repository whose inserts are always refused by the gateway.
struct RejectingListings;

impl ListingRepository for RejectingListings {
    async fn create(&self, _: &Session, _: &ListingFields) -> Result<Listing, ListingError> {
        Err(ListingError::Persistence("row violates policy".into()))
    }

    async fn list_by_owner(&self, _: &Session) -> Result<Vec<Listing>, ListingError> {
        Ok(Vec::new())
    }

    async fn delete_by_id(&self, _: &Session, _: &str) -> Result<(), ListingError> {
        Ok(())
    }
}

fn uploader() -> UploadOrchestrator<MemoryStorage> {
    UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::default())
}

fn composer_with(images: &[&str]) -> ListingComposer {
    let mut composer = ListingComposer::new();
    {
        let draft = composer.edit();
        draft.nomenclature = "Seed Bag".into();
        draft.classification = "Grain".into();
        draft.narrative = String::new();
        draft.set_price("500");
    }
    for image in images {
        composer
            .add_image(ImageSource::Gallery, *image)
            .expect("add image");
    }
    composer
}

#[tokio::test]
async fn publish_uploads_persists_and_resets_draft() {
    let mut composer = composer_with(&["/p/a.jpg", "/p/b.png"]);
    let uploader = uploader();
    let repo = MemoryListings::new();
    let owner = session();

    let listing = composer
        .publish(Some(&owner), &uploader, &repo)
        .await
        .expect("publish");

    assert_eq!(composer.state(), ComposerState::Success);
    assert_eq!(listing.nomenclature, "Seed Bag");
    assert_eq!(listing.classification.as_deref(), Some("Grain"));
    assert_eq!(listing.narrative, None);
    assert_eq!(listing.price, 500.0);
    assert_eq!(listing.image_urls.len(), 2);
    assert!(listing.image_urls[1].ends_with(".png"));

    let draft = composer.draft();
    assert!(draft.nomenclature.is_empty());
    assert!(draft.images().is_empty());
    assert!(draft.price().is_empty());
    assert!(draft.provenance_certified);
    assert!(!draft.logistics_provided);

    let listed = repo.list_by_owner(&owner).await.expect("list");
    assert_eq!(listed, vec![listing]);

    composer.edit().nomenclature = "Next".into();
    assert_eq!(composer.state(), ComposerState::Editing);
}

#[tokio::test]
async fn zero_images_is_rejected_before_any_upload() {
    let mut composer = composer_with(&[]);
    let uploader = uploader();
    let repo = MemoryListings::new();

    let err = composer
        .publish(Some(&session()), &uploader, &repo)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Validation(ValidationError::ImageRequired)
    ));
    assert!(uploader.backend().keys().is_empty());
    assert!(repo.is_empty());
    assert_eq!(composer.state(), ComposerState::Editing);
}

#[tokio::test]
async fn empty_price_is_rejected() {
    let mut composer = composer_with(&["/p/a.jpg"]);
    composer.set_price("no digits");

    let err = composer
        .publish(Some(&session()), &uploader(), &MemoryListings::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PublishError::Validation(ValidationError::InvalidPrice)
    ));
}

#[tokio::test]
async fn long_narrative_blocks_upload() {
    let mut composer = composer_with(&["/p/a.jpg"]);
    composer.edit().narrative = "a".repeat(501);
    let uploader = uploader();

    let err = composer
        .publish(Some(&session()), &uploader, &MemoryListings::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PublishError::Validation(ValidationError::NarrativeTooLong { chars: 501 })
    ));
    assert!(uploader.backend().keys().is_empty());
}

#[tokio::test]
async fn missing_session_requires_authentication_and_keeps_fields() {
    let mut composer = composer_with(&["/p/a.jpg"]);
    let before = composer.draft().clone();

    let err = composer
        .publish(None, &uploader(), &MemoryListings::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::AuthenticationRequired));
    assert_eq!(composer.draft(), &before);
    assert_eq!(composer.state(), ComposerState::Editing);

    let alert = Alert::from(&err);
    assert_eq!(alert.title, "Authentication Required");
    assert_eq!(alert.message, "Please log in to publish listings");
}

#[tokio::test]
async fn one_failed_upload_returns_to_editing_with_all_images() {
    let mut composer = composer_with(&["/p/a.jpg", "/p/flaky.jpg", "/p/c.jpg"]);
    let uploader = UploadOrchestrator::new(
        MemoryStorage::new(BASE).failing_on("flaky", || StorageError::Network("timed out".into())),
        CleanupPolicy::RemoveUploaded,
    );
    let repo = MemoryListings::new();

    let err = composer
        .publish(Some(&session()), &uploader, &repo)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Upload(StorageError::Network(_))));
    assert_eq!(composer.state(), ComposerState::Editing);
    assert!(repo.is_empty());
    assert_eq!(
        composer.draft().images(),
        &[
            ImageLocator::new("/p/a.jpg"),
            ImageLocator::new("/p/flaky.jpg"),
            ImageLocator::new("/p/c.jpg"),
        ]
    );
    assert!(uploader.backend().keys().is_empty());
    assert_eq!(Alert::from(&err).title, "Error");
}

#[tokio::test]
async fn dropped_publish_returns_to_editing() {
    let mut composer = composer_with(&["/p/a.jpg"]);
    let uploader = UploadOrchestrator::new(
        MemoryStorage::new(BASE).with_latency(Duration::from_secs(60)),
        CleanupPolicy::default(),
    );
    let repo = MemoryListings::new();
    let owner = session();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        composer.publish(Some(&owner), &uploader, &repo),
    )
    .await;

    assert!(outcome.is_err(), "publish should still be uploading");
    assert_eq!(composer.state(), ComposerState::Editing);
    assert_eq!(composer.draft().images().len(), 1);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn limit_applies_to_camera_and_gallery_alike() {
    let mut composer = ListingComposer::new();
    for i in 0..MAX_IMAGES {
        composer
            .add_image(ImageSource::Camera, format!("/p/{i}.jpg"))
            .expect("add");
    }
    let err = composer
        .add_image(ImageSource::Gallery, "/p/extra.jpg")
        .unwrap_err();
    assert_eq!(
        Alert::from(&err),
        Alert::new("Limit Reached", "You can only add up to 10 images.")
    );
    assert_eq!(composer.draft().images().len(), MAX_IMAGES);
}

#[tokio::test]
async fn rejected_insert_returns_to_editing_and_discards_photos() {
    let mut composer = composer_with(&["/p/a.jpg", "/p/b.png"]);
    let before = composer.draft().clone();
    let uploader = uploader();

    let err = composer
        .publish(Some(&session()), &uploader, &RejectingListings)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Persistence(ListingError::Persistence(_))
    ));
    assert_eq!(composer.state(), ComposerState::Editing);
    assert_eq!(composer.draft(), &before);
    assert_eq!(composer.draft().images().len(), 2);
    assert!(uploader.backend().keys().is_empty());
    assert_eq!(uploader.backend().removed().len(), 2);
    assert_eq!(Alert::from(&err).title, "Error");
}

#[tokio::test]
async fn rejected_insert_keeps_photos_when_retaining() {
    let mut composer = composer_with(&["/p/a.jpg"]);
    let uploader = UploadOrchestrator::new(MemoryStorage::new(BASE), CleanupPolicy::Retain);

    let err = composer
        .publish(Some(&session()), &uploader, &RejectingListings)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Persistence(_)));
    assert_eq!(composer.state(), ComposerState::Editing);
    assert_eq!(uploader.backend().keys().len(), 1);
    assert!(uploader.backend().removed().is_empty());
}
