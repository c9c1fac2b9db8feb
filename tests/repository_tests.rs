//! Integration tests for the company repository over in-memory SQLite.

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use sexton::company::{CompanyPatch, GRAVEYARD_TIER, UNOWNED_USER};
use sexton::errors::SextonError;
use sexton::server::database::Database;
use sexton::server::repository::CompanyRepository;

/// Helper: create a repository backed by an in-memory SQLite database.
async fn setup_repo() -> CompanyRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("db connect failed");

    let db = Database::from_pool(pool);
    db.migrate().await.expect("migrate failed");

    CompanyRepository::new(Arc::new(db))
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let repo = setup_repo().await;

    let created = repo
        .create(7, "Acme", Some("+1 (555) 123-4567"))
        .await
        .expect("create failed");

    assert_eq!(created.user_id, 7);
    assert_eq!(created.name, "Acme");
    assert!(created.time_stamp.is_none(), "new companies are not enrolled in decay");
    assert!(created.tier.is_none());

    let fetched = repo.get(&created.company_id).await.expect("get failed");
    assert_eq!(fetched.company_id, created.company_id);
    assert_eq!(fetched.name, "Acme");
    assert_eq!(fetched.phone_number.as_deref(), Some("+1 (555) 123-4567"));
}

#[tokio::test]
async fn get_missing_company_is_not_found() {
    let repo = setup_repo().await;

    let err = repo.get("no-such-id").await.unwrap_err();
    assert!(matches!(err, SextonError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let repo = setup_repo().await;

    repo.create(1, "Acme", None).await.expect("create failed");
    let err = repo.create(2, "Acme", None).await.unwrap_err();

    assert!(matches!(err, SextonError::Conflict(_)));
}

#[tokio::test]
async fn create_rejects_empty_name_and_bad_phone() {
    let repo = setup_repo().await;

    let err = repo.create(1, "   ", None).await.unwrap_err();
    assert!(matches!(err, SextonError::InvalidRequest(_)));

    let err = repo.create(1, "Acme", Some("not a number")).await.unwrap_err();
    assert!(matches!(err, SextonError::InvalidRequest(_)));
}

#[tokio::test]
async fn list_all_and_by_user() {
    let repo = setup_repo().await;

    repo.create(1, "Acme", None).await.expect("create failed");
    repo.create(1, "Globex", None).await.expect("create failed");
    repo.create(2, "Initech", None).await.expect("create failed");

    let all = repo.all().await.expect("all failed");
    assert_eq!(all.len(), 3);

    let user_one = repo.all_by_user(1).await.expect("all_by_user failed");
    assert_eq!(user_one.len(), 2);
    assert!(user_one.iter().all(|c| c.user_id == 1));

    let nobody = repo.all_by_user(99).await.expect("all_by_user failed");
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn update_merges_only_set_fields() {
    let repo = setup_repo().await;

    let created = repo
        .create(7, "Acme", Some("5551234567"))
        .await
        .expect("create failed");

    let patch = CompanyPatch {
        time_stamp: Some(30),
        level: Some(3),
        ..Default::default()
    };

    let updated = repo
        .update(&created.company_id, &patch)
        .await
        .expect("update failed");

    assert_eq!(updated.time_stamp, Some(30));
    assert_eq!(updated.level, Some(3));
    // Untouched fields keep their stored values.
    assert_eq!(updated.user_id, 7);
    assert_eq!(updated.phone_number.as_deref(), Some("5551234567"));
    assert!(updated.tier.is_none());
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let repo = setup_repo().await;

    let patch = CompanyPatch {
        time_stamp: Some(10),
        ..Default::default()
    };

    let err = repo.update("no-such-id", &patch).await.unwrap_err();
    assert!(matches!(err, SextonError::NotFound(_)));
}

#[tokio::test]
async fn upsert_creates_then_merges() {
    let repo = setup_repo().await;

    // No record named "Acme" yet: upsert creates one.
    let patch = CompanyPatch {
        user_id: Some(5),
        time_stamp: Some(14),
        ..Default::default()
    };
    let created = repo.upsert("Acme", &patch).await.expect("upsert failed");
    assert_eq!(created.user_id, 5);
    assert_eq!(created.time_stamp, Some(14));

    // Second upsert with the same name merges into the existing record.
    let patch = CompanyPatch {
        level: Some(2),
        ..Default::default()
    };
    let merged = repo.upsert("Acme", &patch).await.expect("upsert failed");
    assert_eq!(merged.company_id, created.company_id);
    assert_eq!(merged.level, Some(2));
    assert_eq!(merged.time_stamp, Some(14));

    assert_eq!(repo.all().await.expect("all failed").len(), 1);
}

#[tokio::test]
async fn upsert_without_owner_creates_unowned_record() {
    let repo = setup_repo().await;

    let patch = CompanyPatch {
        tier: Some(GRAVEYARD_TIER.to_string()),
        time_stamp: Some(0),
        ..Default::default()
    };

    let company = repo.upsert("Defunct Co", &patch).await.expect("upsert failed");
    assert_eq!(company.user_id, UNOWNED_USER);
    assert!(company.is_graveyarded());
}
