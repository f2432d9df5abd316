use agri_core::{AuthUser, ListingFields, Session};
use agri_listings::{ListingError, ListingRepository, MemoryListings};
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;

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

fn fields(nomenclature: &str, price: f64) -> ListingFields {
    ListingFields {
        nomenclature: nomenclature.into(),
        classification: None,
        price,
        narrative: None,
        image_urls: vec!["url1".into()],
        provenance_certified: true,
        logistics_provided: false,
    }
}

#[tokio::test]
async fn created_listing_is_listed_first_with_fields_intact() {
    let repo = MemoryListings::new();
    let owner = session("U");
    repo.create(&owner, &fields("Old Harvest", 10.0))
        .await
        .expect("create");

    let created = repo
        .create(&owner, &fields("Seed Bag", 500.0))
        .await
        .expect("create");

    let listed = repo.list_by_owner(&owner).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].user_id, "U");
    assert_eq!(listed[0].nomenclature, "Seed Bag");
    assert_eq!(listed[0].price, 500.0);
    assert_eq!(listed[0].image_urls, vec!["url1".to_string()]);
    assert_eq!(listed[0].classification, None);
    assert_eq!(listed[0].narrative, None);
}

#[tokio::test]
async fn listing_is_scoped_to_owner() {
    let repo = MemoryListings::new();
    repo.create(&session("A"), &fields("Corn", 1.0))
        .await
        .expect("create");

    assert!(repo.list_by_owner(&session("B")).await.expect("list").is_empty());
    assert_eq!(repo.list_by_owner(&session("A")).await.expect("list").len(), 1);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let repo = MemoryListings::new();
    let owner = session("U");
    let created = repo
        .create(&owner, &fields("Seed Bag", 500.0))
        .await
        .expect("create");

    repo.delete_by_id(&owner, &created.id).await.expect("first delete");
    repo.delete_by_id(&owner, &created.id).await.expect("second delete");
    assert!(repo.list_by_owner(&owner).await.expect("list").is_empty());
}

#[tokio::test]
async fn foreign_delete_leaves_row_in_place() {
    let repo = MemoryListings::new();
    let created = repo
        .create(&session("A"), &fields("Wheat", 7.0))
        .await
        .expect("create");

    repo.delete_by_id(&session("B"), &created.id)
        .await
        .expect("delete");
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn invalid_payload_is_never_stored() {
    let repo = MemoryListings::new();
    let mut bad = fields("Seed Bag", 500.0);
    bad.image_urls.clear();

    let err = repo.create(&session("U"), &bad).await.unwrap_err();
    assert!(matches!(err, ListingError::InvalidListing(_)));
    assert!(repo.is_empty());
}
