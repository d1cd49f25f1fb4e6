//! Login, logout, session gating and login throttling.

mod common;

use axum::http::header::{RETRY_AFTER, SET_COOKIE};
use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_with_cookie, login, post_json, post_with_cookie,
    session_cookie_pair, test_pool, TEST_PASSWORD, TEST_USER,
};

fn credentials(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password })
}

#[tokio::test]
async fn test_login_success_sets_http_only_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    let response = post_json(
        app,
        "/api/v1/auth/login",
        credentials(TEST_USER, TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("pvp_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], TEST_USER);
    assert!(json["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    let response = post_json(app, "/api/v1/auth/login", credentials(TEST_USER, "nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie_pair(&response).is_none());

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_user_returns_401() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    let response = post_json(
        app,
        "/api/v1/auth/login",
        credentials("hina", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sixth_attempt_is_throttled() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            credentials(TEST_USER, "wrong"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even correct credentials are refused once the budget is spent.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        credentials(TEST_USER, TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(RETRY_AFTER));

    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_protected_route_requires_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    let response = get(app.clone(), "/api/v1/students").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_with_cookie(app, "/api/v1/students", "pvp_session=forged").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());
    let cookie = login(app.clone()).await;

    let response = get_with_cookie(app.clone(), "/api/v1/students", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_with_cookie(app.clone(), "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = get_with_cookie(app, "/api/v1/students", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_returns_401() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path().to_path_buf());

    let response = post_with_cookie(app, "/api/v1/auth/logout", "other=1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
