#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use columbia_api::auth::session::{issue_session, SessionConfig};
use columbia_api::config::{Environment, ServerConfig};
use columbia_api::router::build_app_router;
use columbia_api::state::AppState;
use columbia_core::types::DbId;
use columbia_db::memory::MemoryStore;
use columbia_db::models::user::{CreateUser, User};
use columbia_db::DatabaseConfig;

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.to_string(),
        ttl_hours: 1,
        secure_cookie: false,
    }
}

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Development,
        session: session_config(),
        database: DatabaseConfig {
            url: "memory://".to_string(),
            public_key: "public-anon-key".to_string(),
            service_key: "service-role-secret".to_string(),
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user with the given role.
pub async fn seed_user(store: &MemoryStore, platform_id: &str, role: &str) -> User {
    store
        .insert_user(CreateUser {
            role: role.to_string(),
            display_name: format!("{platform_id} (display)"),
            platform_id: platform_id.to_string(),
            avatar_url: None,
        })
        .await
}

/// `Cookie` header value carrying a valid session for `user_id`.
pub fn session_cookie_for(user_id: DbId) -> String {
    let token = issue_session(user_id, &session_config()).expect("token issue should succeed");
    format!("session-token={token}")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
