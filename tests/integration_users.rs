mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;

fn me_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/users/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_get_profile_with_access_token() {
    let app = test_app(test_state().await);
    let username = unique_username();
    join(&app, &username).await;
    let (access, _) = login(&app, &username).await;

    let response = send(&app, me_request(Some(&format!("Bearer {}", access)))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], username);
    assert!(body["id"].is_string());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_get_profile_without_token() {
    let app = test_app(test_state().await);

    let response = send(&app, me_request(None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_profile_rejects_refresh_token() {
    let app = test_app(test_state().await);
    let username = unique_username();
    join(&app, &username).await;
    let (_, refresh) = login(&app, &username).await;

    let response = send(&app, me_request(Some(&format!("Bearer {}", refresh)))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_get_profile_rejects_garbage_token() {
    let app = test_app(test_state().await);

    let response = send(&app, me_request(Some("Bearer not.a.token"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_profile_rejects_non_bearer_scheme() {
    let app = test_app(test_state().await);

    let response = send(&app, me_request(Some("Basic dXNlcjpwYXNz"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_profile_for_deleted_user() {
    let state = test_state().await;
    let db = state.db.clone();
    let app = test_app(state);
    let username = unique_username();
    join(&app, &username).await;
    let (access, _) = login(&app, &username).await;

    sqlx::query("DELETE FROM users WHERE username = ?")
        .bind(&username)
        .execute(&db)
        .await
        .unwrap();

    let response = send(&app, me_request(Some(&format!("Bearer {}", access)))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
