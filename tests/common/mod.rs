#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tollgate::router::init_router;
use tollgate::state::AppState;
use tollgate_config::{CookieConfig, CorsConfig, JwtConfig, PasswordConfig};
use tollgate_db::init_memory_pool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret123";

pub fn fixture(name: &str) -> String {
    format!(
        "{}/crates/tollgate-auth/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).unwrap()
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        private_key_path: fixture("ec_private_a.pem").into(),
        public_key_path: fixture("ec_public_a.pem").into(),
        ..JwtConfig::default()
    }
}

pub async fn test_state_with(jwt_config: JwtConfig) -> AppState {
    let db = init_memory_pool().await.unwrap();
    AppState::new(
        db,
        jwt_config,
        CookieConfig::default(),
        PasswordConfig { bcrypt_cost: 4 },
        CorsConfig::from_origins("http://localhost:3000"),
    )
    .unwrap()
}

pub async fn test_state() -> AppState {
    test_state_with(test_jwt_config()).await
}

pub fn test_app(state: AppState) -> Router {
    init_router(state)
}

pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().simple().to_string()[..12])
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Value of the `name` cookie in a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str, name: &str) -> Option<String> {
    let (pair, _) = set_cookie.split_once(';').unwrap_or((set_cookie, ""));
    let (cookie_name, value) = pair.split_once('=')?;
    (cookie_name.trim() == name).then(|| value.trim().to_string())
}

/// Registers `username` with [`TEST_PASSWORD`] through the API.
pub async fn join(app: &Router, username: &str) {
    let response = send(
        app,
        json_request(
            "POST",
            "/users/auth/join",
            serde_json::json!({"username": username, "password": TEST_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

/// Logs in and returns the access token and the raw refresh token.
pub async fn login(app: &Router, username: &str) -> (String, String) {
    let response = send(
        app,
        json_request(
            "POST",
            "/users/auth/login",
            serde_json::json!({"username": username, "password": TEST_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let refresh = set_cookies(&response)
        .iter()
        .find_map(|c| cookie_value(c, "refresh_token"))
        .unwrap();
    let body = body_json(response).await;
    (body["access_token"].as_str().unwrap().to_string(), refresh)
}
