mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{PASSWORD, app, call, login, register, signup};

#[tokio::test]
async fn login_sets_http_only_cookie_and_keeps_token_out_of_body() {
    let app = app().await;
    signup(&app, "alice@example.com", "alice").await;

    let response = call(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie();
    assert!(cookie.starts_with("sessionId="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));

    let body = response.json();
    assert_eq!(body["code"], "LOGIN_SUCCESS");
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(body["data"]["user"]["nickname"], "alice");

    let token = cookie["sessionId=".len()..]
        .split(';')
        .next()
        .expect("cookie value")
        .to_string();
    let raw = String::from_utf8(response.bytes.clone()).expect("utf-8 body");
    assert!(!raw.contains(&token), "token leaked into the body");
}

#[tokio::test]
async fn duplicate_signup_is_conflict_with_field_code() {
    let app = app().await;
    signup(&app, "alice@example.com", "alice").await;

    let dup_email = call(
        &app,
        Method::POST,
        "/v1/auth/signup",
        Some(json!({
            "email": "ALICE@example.com",
            "password": PASSWORD,
            "nickname": "alice",
        })),
        None,
    )
    .await;
    assert_eq!(dup_email.status, StatusCode::CONFLICT);
    assert_eq!(dup_email.code(), "EMAIL_ALREADY_EXISTS");

    let dup_nickname = call(
        &app,
        Method::POST,
        "/v1/auth/signup",
        Some(json!({
            "email": "other@example.com",
            "password": PASSWORD,
            "nickname": "alice",
        })),
        None,
    )
    .await;
    assert_eq!(dup_nickname.status, StatusCode::CONFLICT);
    assert_eq!(dup_nickname.code(), "NICKNAME_ALREADY_EXISTS");
}

#[tokio::test]
async fn signup_validation_codes_follow_field_order() {
    let app = app().await;

    let cases = [
        (json!({ "password": PASSWORD, "nickname": "n" }), "EMAIL_REQUIRED"),
        (
            json!({ "email": "bad", "password": PASSWORD, "nickname": "n" }),
            "INVALID_EMAIL",
        ),
        (
            json!({ "email": "a@b.co", "password": "short", "nickname": "n" }),
            "INVALID_PASSWORD",
        ),
        (
            json!({
                "email": "a@b.co",
                "password": PASSWORD,
                "passwordConfirm": "Other12!",
                "nickname": "n",
            }),
            "PASSWORD_CONFIRM_MISMATCH",
        ),
        (
            json!({ "email": "a@b.co", "password": PASSWORD, "nickname": "elevenchars" }),
            "INVALID_NICKNAME",
        ),
    ];

    for (body, code) in cases {
        let response = call(&app, Method::POST, "/v1/auth/signup", Some(body), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), code);
    }
}

#[tokio::test]
async fn wrong_password_and_malformed_json_are_rejected() {
    let app = app().await;
    signup(&app, "alice@example.com", "alice").await;

    let response = call(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "alice@example.com", "password": "Wrong123!" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
    assert!(response.json()["message"].is_string());

    let response = call(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!(["not", "an", "object"])),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "BAD_REQUEST");
}

#[tokio::test]
async fn me_requires_session_and_logout_invalidates_it() {
    let app = app().await;

    let anonymous = call(&app, Method::GET, "/v1/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.code(), "UNAUTHORIZED");

    let (cookie, user_id) = register(&app, "alice@example.com", "alice").await;

    let me = call(&app, Method::GET, "/v1/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.code(), "USER_RETRIEVED");
    assert_eq!(me.json()["data"]["userId"], user_id);

    let logout = call(&app, Method::POST, "/v1/auth/logout", None, Some(&cookie)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.code(), "LOGOUT_SUCCESS");
    assert!(logout.set_cookie().contains("Max-Age=0"));

    let after = call(&app, Method::GET, "/v1/auth/me", None, Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_session_cookie_is_unauthorized() {
    let app = app().await;
    let response = call(
        &app,
        Method::GET,
        "/v1/users/me",
        None,
        Some("sessionId=not-a-real-token"),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn availability_endpoints_report_taken_values() {
    let app = app().await;
    signup(&app, "alice@example.com", "alice").await;

    let taken = call(
        &app,
        Method::GET,
        "/v1/auth/emails/availability?email=alice%40example.com",
        None,
        None,
    )
    .await;
    assert_eq!(taken.status, StatusCode::OK);
    assert_eq!(taken.code(), "EMAIL_AVAILABLE");
    assert_eq!(taken.json()["data"]["available"], false);

    let free = call(
        &app,
        Method::GET,
        "/v1/auth/nicknames/availability?nickname=bob",
        None,
        None,
    )
    .await;
    assert_eq!(free.code(), "NICKNAME_AVAILABLE");
    assert_eq!(free.json()["data"]["available"], true);

    let invalid = call(
        &app,
        Method::GET,
        "/v1/auth/emails/availability?email=nope",
        None,
        None,
    )
    .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.code(), "INVALID_EMAIL");
}

#[tokio::test]
async fn second_login_issues_independent_session() {
    let app = app().await;
    let (first, _) = register(&app, "alice@example.com", "alice").await;
    let (second, _) = login(&app, "alice@example.com").await;
    assert_ne!(first, second);

    call(&app, Method::POST, "/v1/auth/logout", None, Some(&first)).await;
    let still_valid = call(&app, Method::GET, "/v1/auth/me", None, Some(&second)).await;
    assert_eq!(still_valid.status, StatusCode::OK);
}
