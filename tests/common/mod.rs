#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tokengate::router::init_router;
use tokengate::state::{AppState, UserBackend};
use tokengate_auth::{InMemoryUserStore, TokenCodec, TokenLifetimes, TokenService, User};
use tokengate_config::{CorsConfig, ServerConfig};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";
pub const PASSWORD: &str = "testpass123";

pub const ACTIVE_ID: i64 = 7;
pub const ACTIVE_EMAIL: &str = "active@test.com";
pub const INACTIVE_ID: i64 = 8;
pub const INACTIVE_EMAIL: &str = "inactive@test.com";

pub const LIFETIMES: TokenLifetimes = TokenLifetimes {
    access: 15 * 60,
    refresh: 30 * 24 * 60 * 60,
};

pub fn test_user(id: i64, email: &str, active: bool) -> User {
    User {
        id,
        email: email.to_string(),
        full_name: Some("Test User".to_string()),
        password_hash: bcrypt::hash(PASSWORD, 4).unwrap(),
        is_active: active,
        is_superuser: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryUserStore,
    pub codec: TokenCodec,
}

/// Router over an in-memory store holding one active and one inactive user.
pub fn setup_test_app() -> TestApp {
    let store = InMemoryUserStore::with_users([
        test_user(ACTIVE_ID, ACTIVE_EMAIL, true),
        test_user(INACTIVE_ID, INACTIVE_EMAIL, false),
    ]);
    let codec = TokenCodec::new(SECRET);
    let service = TokenService::new(
        UserBackend::Memory(store.clone()),
        codec.clone(),
        LIFETIMES,
    );
    let state = AppState::new(
        service,
        ServerConfig::default(),
        CorsConfig::from_lookup(|_| None),
    );

    TestApp {
        router: init_router(state),
        store,
        codec,
    }
}

pub fn json_request(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Logs the active user in and returns `(access_token, refresh_token)`.
pub async fn login(app: &TestApp) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            "/api/v1/login/access-token",
            serde_json::json!({ "identifier": ACTIVE_EMAIL, "password": PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}
