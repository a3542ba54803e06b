mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{PASSWORD, app, call, create_comment, create_post, register, signup};

#[tokio::test]
async fn profile_update_rejects_taken_nickname_but_allows_own() {
    let app = app().await;
    let (alice, _) = register(&app, "alice@example.com", "alice").await;
    register(&app, "bob@example.com", "bob").await;

    let taken = call(
        &app,
        Method::PATCH,
        "/v1/users/me",
        Some(json!({ "nickname": "bob" })),
        Some(&alice),
    )
    .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
    assert_eq!(taken.code(), "NICKNAME_ALREADY_EXISTS");

    let same = call(
        &app,
        Method::PATCH,
        "/v1/users/me",
        Some(json!({ "nickname": "alice", "profileImageUrl": "/img/a.png" })),
        Some(&alice),
    )
    .await;
    assert_eq!(same.status, StatusCode::OK);
    assert_eq!(same.code(), "USER_UPDATED");
    assert_eq!(same.json()["data"]["profileImageUrl"], "/img/a.png");

    let renamed = call(
        &app,
        Method::PATCH,
        "/v1/users/me",
        Some(json!({ "nickname": " alicia " })),
        Some(&alice),
    )
    .await;
    assert_eq!(renamed.json()["data"]["nickname"], "alicia");
}

#[tokio::test]
async fn profile_image_endpoint_rejects_blank_url() {
    let app = app().await;
    let (alice, _) = register(&app, "alice@example.com", "alice").await;

    let blank = call(
        &app,
        Method::PATCH,
        "/v1/users/me/profile-image-url",
        Some(json!({ "profileImageUrl": "   " })),
        Some(&alice),
    )
    .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.code(), "BAD_REQUEST");

    let updated = call(
        &app,
        Method::PATCH,
        "/v1/users/me/profile-image-url",
        Some(json!({ "profileImageUrl": "/public/files/abc" })),
        Some(&alice),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.code(), "PROFILE_IMAGE_UPDATED");
    assert_eq!(updated.json()["data"]["profileImageUrl"], "/public/files/abc");
}

#[tokio::test]
async fn changed_password_is_required_on_next_login() {
    let app = app().await;
    let (alice, _) = register(&app, "alice@example.com", "alice").await;

    let mismatch = call(
        &app,
        Method::PATCH,
        "/v1/users/me/password",
        Some(json!({ "password": "Newpass1!", "passwordConfirm": "Other1!x" })),
        Some(&alice),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.code(), "PASSWORD_CONFIRM_MISMATCH");

    let changed = call(
        &app,
        Method::PATCH,
        "/v1/users/me/password",
        Some(json!({ "password": "Newpass1!", "passwordConfirm": "Newpass1!" })),
        Some(&alice),
    )
    .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert_eq!(changed.code(), "PASSWORD_UPDATED");

    let old = call(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
        None,
    )
    .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = call(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": "Newpass1!" })),
        None,
    )
    .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_account_hides_content_and_frees_identity() {
    let app = app().await;
    let (alice, alice_id) = register(&app, "alice@example.com", "alice").await;
    let (bob, _) = register(&app, "bob@example.com", "bob").await;
    let alice_post = create_post(&app, &alice, "by alice").await;
    let bob_post = create_post(&app, &bob, "by bob").await;
    create_comment(&app, &alice, bob_post, "alice was here").await;

    let deleted = call(&app, Method::DELETE, "/v1/users/me", None, Some(&alice)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.code(), "USER_DELETED");
    assert!(deleted.set_cookie().contains("Max-Age=0"));

    let stale = call(&app, Method::GET, "/v1/auth/me", None, Some(&alice)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let profile = call(&app, Method::GET, &format!("/v1/users/{alice_id}"), None, None).await;
    assert_eq!(profile.status, StatusCode::NOT_FOUND);

    let post = call(&app, Method::GET, &format!("/v1/posts/{alice_post}"), None, None).await;
    assert_eq!(post.status, StatusCode::NOT_FOUND);

    let comments = call(
        &app,
        Method::GET,
        &format!("/v1/posts/{bob_post}/comments"),
        None,
        None,
    )
    .await;
    assert_eq!(comments.status, StatusCode::OK);
    assert_eq!(comments.json()["data"]["items"], json!([]));

    let listed = call(&app, Method::GET, "/v1/posts", None, None).await;
    assert_eq!(listed.json()["data"]["total"], 1);

    signup(&app, "alice@example.com", "alice").await;
}

#[tokio::test]
async fn public_profile_lookup() {
    let app = app().await;
    let (_, alice_id) = register(&app, "alice@example.com", "alice").await;

    let found = call(&app, Method::GET, &format!("/v1/users/{alice_id}"), None, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.code(), "USER_RETRIEVED");
    let body = found.json();
    assert_eq!(body["data"]["nickname"], "alice");
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());

    let missing = call(&app, Method::GET, "/v1/users/9999", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.code(), "NOT_FOUND");
}
