#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use board_server::infrastructure::settings::{LogFormat, Settings, StorageBackend};
use board_server::server::build_app;

pub const PASSWORD: &str = "Secret12!";

pub fn test_settings() -> Settings {
    Settings {
        storage_backend: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        http_addr: "127.0.0.1:0".to_string(),
        cors_origins: vec!["http://localhost:8000".to_string()],
        log_level: "warn".to_string(),
        log_format: LogFormat::Compact,
        session_ttl_seconds: 3600,
        session_cookie_secure: false,
        http_request_body_limit_bytes: 1024 * 1024,
        http_concurrency_limit: 64,
        http_request_timeout_secs: 30,
    }
}

pub async fn app() -> Router {
    build_app(&test_settings())
        .await
        .expect("memory-backed app must build")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body must be JSON")
    }

    pub fn code(&self) -> String {
        self.json()["code"]
            .as_str()
            .expect("body must carry a code")
            .to_string()
    }

    pub fn set_cookie(&self) -> String {
        self.headers
            .get(header::SET_COOKIE)
            .expect("response must set a cookie")
            .to_str()
            .expect("cookie must be ASCII")
            .to_string()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable")
        .to_vec();

    TestResponse {
        status,
        headers,
        bytes,
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request must build")
}

pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    send(app, request(method, uri, body, cookie)).await
}

pub async fn signup(app: &Router, email: &str, nickname: &str) {
    let response = call(
        app,
        Method::POST,
        "/v1/auth/signup",
        Some(json!({
            "email": email,
            "password": PASSWORD,
            "passwordConfirm": PASSWORD,
            "nickname": nickname,
        })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "signup of {email} failed");
}

/// Logs in and returns the `name=value` pair ready for a `Cookie` header,
/// together with the user id.
pub async fn login(app: &Router, email: &str) -> (String, i64) {
    let response = call(
        app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": email, "password": PASSWORD })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "login of {email} failed");

    let set_cookie = response.set_cookie();
    let pair = set_cookie
        .split(';')
        .next()
        .expect("cookie must have a name=value pair")
        .to_string();
    let user_id = response.json()["data"]["user"]["userId"]
        .as_i64()
        .expect("login must return the user id");
    (pair, user_id)
}

pub async fn register(app: &Router, email: &str, nickname: &str) -> (String, i64) {
    signup(app, email, nickname).await;
    login(app, email).await
}

pub async fn create_post(app: &Router, cookie: &str, title: &str) -> i64 {
    let response = call(
        app,
        Method::POST,
        "/v1/posts",
        Some(json!({ "title": title, "content": "body text" })),
        Some(cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["data"]["postId"]
        .as_i64()
        .expect("create must return postId")
}

pub async fn create_comment(app: &Router, cookie: &str, post_id: i64, content: &str) -> i64 {
    let response = call(
        app,
        Method::POST,
        &format!("/v1/posts/{post_id}/comments"),
        Some(json!({ "content": content })),
        Some(cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["data"]["commentId"]
        .as_i64()
        .expect("create must return commentId")
}
