//! Integration tests for the account deletion cascade.
//!
//! These tests run against a real PostgreSQL database. Set `TEST_DATABASE_URL`
//! to point at a disposable test database before running them.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    add_member_with_joined_at, count_family_entries, count_family_invites, count_family_members,
    count_family_owners, count_user_entries, create_authenticated_user, create_test_app,
    create_test_family, create_test_invite, create_test_pool, delete_request_with_auth,
    family_exists, fetch_family_owner_id, fetch_member_role, join_family_via_invite,
    json_request_with_auth, parse_response_body, run_migrations, test_config, user_exists,
    AuthenticatedUser, TestUser,
};

/// Post a ledger entry and assert it was created.
async fn create_entry(app: &Router, auth: &AuthenticatedUser, family_id: Uuid, amount: i64) {
    let mut body = serde_json::json!({
        "amount": amount,
        "entry_date": "2026-08-20",
        "description": "integration fixture"
    });
    if amount > 0 {
        // Expenses require a receipt photo
        body["photo_url"] = serde_json::json!("https://example.com/receipt.jpg");
    }

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/families/{}/entries", family_id),
        body,
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_sole_owner_deletion_removes_family() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let family = create_test_family(&app, &owner).await;
    create_test_invite(&app, &owner, family.id).await;
    create_entry(&app, &owner, family.id, -50_000).await;
    create_entry(&app, &owner, family.id, 12_500).await;

    let request = delete_request_with_auth("/api/v1/auth/me", &owner.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_response_body(response).await;
    assert_eq!(json["families_deleted"].as_i64().unwrap(), 1);
    assert_eq!(json["families_transferred"].as_i64().unwrap(), 0);
    assert_eq!(json["entries_deleted"].as_i64().unwrap(), 2);
    assert_eq!(json["memberships_deleted"].as_i64().unwrap(), 1);

    assert!(!family_exists(&pool, family.id).await);
    assert_eq!(count_family_members(&pool, family.id).await, 0);
    assert_eq!(count_family_invites(&pool, family.id).await, 0);
    assert_eq!(count_family_entries(&pool, family.id).await, 0);
    assert!(!user_exists(&pool, owner.user_id).await);
}

#[tokio::test]
async fn test_owner_deletion_transfers_to_earliest_joined_member() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let family = create_test_family(&app, &owner).await;

    // Two members with controlled join order
    let early_member = create_authenticated_user(&app, &TestUser::new()).await;
    let late_member = create_authenticated_user(&app, &TestUser::new()).await;
    add_member_with_joined_at(
        &pool,
        family.id,
        early_member.user_id,
        Utc::now() - Duration::hours(2),
    )
    .await;
    add_member_with_joined_at(
        &pool,
        family.id,
        late_member.user_id,
        Utc::now() - Duration::hours(1),
    )
    .await;

    let request = delete_request_with_auth("/api/v1/auth/me", &owner.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_response_body(response).await;
    assert_eq!(json["families_transferred"].as_i64().unwrap(), 1);
    assert_eq!(json["families_deleted"].as_i64().unwrap(), 0);

    // The earliest joiner inherits the family
    assert!(family_exists(&pool, family.id).await);
    assert_eq!(
        fetch_family_owner_id(&pool, family.id).await,
        Some(early_member.user_id)
    );
    assert_eq!(
        fetch_member_role(&pool, family.id, early_member.user_id).await,
        Some("owner".to_string())
    );
    assert_eq!(
        fetch_member_role(&pool, family.id, late_member.user_id).await,
        Some("member".to_string())
    );
    assert_eq!(count_family_owners(&pool, family.id).await, 1);
    assert_eq!(count_family_members(&pool, family.id).await, 2);
    assert!(!user_exists(&pool, owner.user_id).await);
}

#[tokio::test]
async fn test_member_deletion_keeps_family_and_other_entries() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let family = create_test_family(&app, &owner).await;
    let code = create_test_invite(&app, &owner, family.id).await;

    let member = create_authenticated_user(&app, &TestUser::new()).await;
    join_family_via_invite(&app, &member, &code).await;

    create_entry(&app, &owner, family.id, -30_000).await;
    create_entry(&app, &member, family.id, -1_000).await;
    create_entry(&app, &member, family.id, 4_500).await;

    let request = delete_request_with_auth("/api/v1/auth/me", &member.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_response_body(response).await;
    assert_eq!(json["families_transferred"].as_i64().unwrap(), 0);
    assert_eq!(json["families_deleted"].as_i64().unwrap(), 0);
    assert_eq!(json["entries_deleted"].as_i64().unwrap(), 2);
    assert_eq!(json["memberships_deleted"].as_i64().unwrap(), 1);

    // The family and the owner's entries survive
    assert!(family_exists(&pool, family.id).await);
    assert_eq!(count_family_entries(&pool, family.id).await, 1);
    assert_eq!(count_user_entries(&pool, owner.user_id).await, 1);
    assert_eq!(fetch_member_role(&pool, family.id, member.user_id).await, None);
    assert!(!user_exists(&pool, member.user_id).await);
}

#[tokio::test]
async fn test_tokens_stop_working_after_deletion() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let user = create_authenticated_user(&app, &TestUser::new()).await;

    let request = delete_request_with_auth("/api/v1/auth/me", &user.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The refresh token must not mint new tokens for a deleted account
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/refresh")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_string(&serde_json::json!({
                "refresh_token": user.refresh_token
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
