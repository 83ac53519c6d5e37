//! Integration tests for the register/login/verify handlers
mod common;

use crate::common::{
    TEST_JWT_SECRET, body_bytes, body_json, create_test_app_state, get_with_bearer, post_json,
    register_body,
};

use axum::http::StatusCode;
use serde_json::json;
use sm_db::UserRepository;
use sm_server::routes::build_router;

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn test_register_creates_user_and_returns_token() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let response = post_json(app, "/api/auth/register", register_body("ada", "ada@x.com")).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["username"], "ada");
    assert_eq!(json["data"]["fullName"], "ada Test");
    assert_eq!(json["data"]["email"], "ada@x.com");
    assert!(!json["data"]["_id"].as_str().unwrap().is_empty());
    assert!(!json["data"]["token"].as_str().unwrap().is_empty());

    // The record exists, with no clear-text password anywhere on it
    let repo = UserRepository::new(state.pool.clone());
    let user = repo.find_by_email("ada@x.com").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "secret123");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_missing_fields_is_rejected() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let response = post_json(
        app,
        "/api/auth/register",
        json!({"username": "ada", "fullName": "", "email": "ada@x.com", "password": "pw"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please fill all required fields");

    let repo = UserRepository::new(state.pool.clone());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_absent_fields_are_rejected_like_empty_ones() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    // Fields left out of the body entirely, not sent as empty strings
    let response = post_json(app, "/api/auth/register", json!({"username": "ada"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please fill all required fields");

    let repo = UserRepository::new(state.pool.clone());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts_without_new_record() {
    let state = create_test_app_state().await;

    let first = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("someone-else", "ada@x.com"),
    )
    .await;

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "User already exists with this email or username"
    );

    // Exactly one record across both attempts
    let repo = UserRepository::new(state.pool.clone());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let state = create_test_app_state().await;

    post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;

    let response = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "other@x.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let repo = UserRepository::new(state.pool.clone());
    assert_eq!(repo.count().await.unwrap(), 1);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_token_and_authorization_header() {
    let state = create_test_app_state().await;

    post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;

    let response = post_json(
        build_router(state.clone()),
        "/api/auth/login",
        json!({"email": "ada@x.com", "password": "secret123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get("authorization")
        .expect("login must set the Authorization response header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(header.starts_with("Bearer "));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "ada@x.com");

    // Header and body carry the same token
    let token = json["data"]["token"].as_str().unwrap();
    assert_eq!(header, format!("Bearer {}", token));
}

#[tokio::test]
async fn test_login_missing_fields_is_rejected() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let response = post_json(
        app,
        "/api/auth/login",
        json!({"email": "", "password": "secret123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide email and password");
}

#[tokio::test]
async fn test_login_with_absent_password_returns_canonical_400() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    // No password key at all; must produce the same 400 envelope as an
    // empty one, not a deserializer rejection.
    let response = post_json(app, "/api/auth/login", json!({"email": "ada@x.com"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please provide email and password");
}

#[tokio::test]
async fn test_login_failures_are_byte_identical_for_bad_email_and_bad_password() {
    let state = create_test_app_state().await;

    post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;

    // Known email, wrong password
    let wrong_password = post_json(
        build_router(state.clone()),
        "/api/auth/login",
        json!({"email": "ada@x.com", "password": "wrong"}),
    )
    .await;

    // Unknown email
    let unknown_email = post_json(
        build_router(state.clone()),
        "/api/auth/login",
        json!({"email": "nobody@x.com", "password": "secret123"}),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // An attacker must not be able to tell which part failed
    assert_eq!(
        body_bytes(wrong_password).await,
        body_bytes(unknown_email).await
    );
}

// =============================================================================
// Verify
// =============================================================================

#[tokio::test]
async fn test_verify_accepts_freshly_issued_token() {
    let state = create_test_app_state().await;

    let register = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;
    let registered = body_json(register).await;
    let token = registered["data"]["token"].as_str().unwrap().to_string();

    let response = get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["username"], "ada");
    assert_eq!(json["data"]["_id"], registered["data"]["_id"]);
}

#[tokio::test]
async fn test_verify_rejects_garbage_token() {
    let state = create_test_app_state().await;

    let response =
        get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some("garbage")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_verify_rejects_missing_header() {
    let state = create_test_app_state().await;

    let response = get_with_bearer(build_router(state.clone()), "/api/auth/verify", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing authorization header");
}

#[tokio::test]
async fn test_verify_rejects_non_bearer_scheme() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/auth/verify")
        .header("authorization", "Basic YWRhOnNlY3JldA==")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid authorization scheme");
}

#[tokio::test]
async fn test_verify_rejects_expired_token_with_valid_signature() {
    let state = create_test_app_state().await;

    let register = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;
    let registered = body_json(register).await;
    let user_id = registered["data"]["_id"].as_str().unwrap();

    // Sign an already-expired token for a real user with the real secret
    let now = chrono::Utc::now().timestamp();
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &sm_auth::Claims {
            sub: user_id.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        },
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .unwrap();

    let response =
        get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some(&expired)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_rejects_tampered_signature() {
    let state = create_test_app_state().await;

    let register = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        register_body("ada", "ada@x.com"),
    )
    .await;
    let token = body_json(register).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (head, sig) = token.rsplit_once('.').unwrap();
    let flipped = if sig.as_bytes()[0] == b'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", head, flipped, &sig[1..]);

    let response =
        get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some(&tampered)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[tokio::test]
async fn test_end_to_end_register_login_verify() {
    let state = create_test_app_state().await;

    // Register ada
    let register = post_json(
        build_router(state.clone()),
        "/api/auth/register",
        json!({
            "username": "ada",
            "fullName": "Ada L",
            "email": "ada@x.com",
            "password": "secret123",
        }),
    )
    .await;
    assert_eq!(register.status(), StatusCode::CREATED);
    let registered = body_json(register).await;
    assert!(!registered["data"]["token"].as_str().unwrap().is_empty());

    // Login with the wrong password
    let bad_login = post_json(
        build_router(state.clone()),
        "/api/auth/login",
        json!({"email": "ada@x.com", "password": "wrong"}),
    )
    .await;
    assert_eq!(bad_login.status(), StatusCode::UNAUTHORIZED);
    let bad = body_json(bad_login).await;
    assert_eq!(bad["success"], false);
    assert_eq!(bad["message"], "Invalid email or password");

    // Login with the correct password
    let login = post_json(
        build_router(state.clone()),
        "/api/auth/login",
        json!({"email": "ada@x.com", "password": "secret123"}),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let token = body_json(login).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    // Verify the issued token
    let verify = get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some(&token)).await;
    assert_eq!(verify.status(), StatusCode::OK);
    let identity = body_json(verify).await;
    assert_eq!(identity["data"]["fullName"], "Ada L");

    // Verify garbage
    let garbage =
        get_with_bearer(build_router(state.clone()), "/api/auth/verify", Some("garbage")).await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}
