//! API Integration Tests
//!
//! Tests marked with #[ignore] require a running PostgreSQL instance with
//! migrations applied. To run them, point DATABASE_URL at a test database
//! and run: cargo test -- --ignored
//!
//! The remaining tests (health probes and access-gate rejections) drive the
//! real router and run without a database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use roster_api::create_router_for_testing;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// =============================================================================
// Access Gate Tests (no database required)
// =============================================================================
// The gate rejects these requests before any handler or query runs.

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unauthorized");
}

#[tokio::test]
async fn test_me_with_invalid_token_returns_401() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", "Bearer invalid.jwt.token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Unauthorized");
}

#[tokio::test]
async fn test_me_with_non_bearer_header_returns_401() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_failures_share_one_response_shape() {
    // Missing header, malformed token, and wrong-secret token must be
    // indistinguishable to the caller.
    let missing = {
        let app = create_router_for_testing();
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/me")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    };

    let forged = {
        let app = create_router_for_testing();
        // Signed with a secret the server does not hold
        let config = roster_api::auth::JwtConfig {
            secret: "attacker-controlled-secret".to_string(),
            ..Default::default()
        };
        let token =
            roster_api::auth::issue_access_token(&config, uuid::Uuid::new_v4()).unwrap();
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/me")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    };

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let missing_json = body_json(missing).await;
    let forged_json = body_json(forged).await;
    assert_eq!(missing_json, forged_json);
}

#[tokio::test]
async fn test_protected_record_routes_without_auth() {
    for (method, uri) in [
        ("POST", "/api/v1/records"),
        ("GET", "/api/v1/records"),
        ("PUT", "/api/v1/records/550e8400-e29b-41d4-a716-446655440000"),
        (
            "DELETE",
            "/api/v1/records/550e8400-e29b-41d4-a716-446655440000",
        ),
    ] {
        let app = create_router_for_testing();
        let response = app
            .oneshot(create_json_request(method, uri, None))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} should be gated"
        );
    }
}

// =============================================================================
// Registration Tests
// =============================================================================

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret1"
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User registered successfully!");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = create_router_for_testing();

    let request1 = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "first",
            "email": "duplicate@example.com",
            "password": "secret1"
        })),
    );
    app.clone().oneshot(request1).await.unwrap();

    let request2 = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "second",
            "email": "duplicate@example.com",
            "password": "different2"
        })),
    );

    let response = app.oneshot(request2).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "User already exists!");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_concurrent_duplicates_one_wins() {
    // Two registrations race on the same email; the UNIQUE constraint is the
    // final arbiter and the loser gets the duplicate-user error, not a 500.
    let app = create_router_for_testing();

    let make_request = |username: &str| {
        create_json_request(
            "POST",
            "/api/v1/register",
            Some(json!({
                "username": username,
                "email": "race@example.com",
                "password": "secret1"
            })),
        )
    };

    let (first, second) = tokio::join!(
        app.clone().oneshot(make_request("one")),
        app.clone().oneshot(make_request("two")),
    );

    let statuses = [first.unwrap().status(), second.unwrap().status()];
    assert!(statuses.contains(&StatusCode::CREATED));
    assert!(statuses.contains(&StatusCode::BAD_REQUEST));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_missing_fields() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "",
            "email": "someone@example.com",
            "password": "secret1"
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

// =============================================================================
// Login Tests
// =============================================================================

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success() {
    let app = create_router_for_testing();

    let register_request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "logintest",
            "email": "logintest@example.com",
            "password": "secret1"
        })),
    );
    app.clone().oneshot(register_request).await.unwrap();

    let login_request = create_json_request(
        "POST",
        "/api/v1/login",
        Some(json!({
            "email": "logintest@example.com",
            "password": "secret1"
        })),
    );

    let response = app.oneshot(login_request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User successfully logged in!");
    assert!(json["accessToken"].is_string());
    assert!(!json["accessToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_unknown_email_and_wrong_password_look_identical() {
    let app = create_router_for_testing();

    let register_request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "enumtest",
            "email": "enumtest@example.com",
            "password": "secret1"
        })),
    );
    app.clone().oneshot(register_request).await.unwrap();

    let unknown_email = app
        .clone()
        .oneshot(create_json_request(
            "POST",
            "/api/v1/login",
            Some(json!({
                "email": "nosuchuser@example.com",
                "password": "secret1"
            })),
        ))
        .await
        .unwrap();

    let wrong_password = app
        .oneshot(create_json_request(
            "POST",
            "/api/v1/login",
            Some(json!({
                "email": "enumtest@example.com",
                "password": "not-the-password"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_json = body_json(unknown_email).await;
    let wrong_json = body_json(wrong_password).await;
    assert_eq!(unknown_json, wrong_json);
}

// =============================================================================
// End-to-End Flow
// =============================================================================

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_login_me_flow() {
    let app = create_router_for_testing();

    // Register
    let register_request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1"
        })),
    );
    let register_response = app.clone().oneshot(register_request).await.unwrap();
    assert_eq!(register_response.status(), StatusCode::CREATED);

    // Login
    let login_request = create_json_request(
        "POST",
        "/api/v1/login",
        Some(json!({
            "email": "a@x.com",
            "password": "secret1"
        })),
    );
    let login_response = app.clone().oneshot(login_request).await.unwrap();
    assert_eq!(login_response.status(), StatusCode::OK);

    let login_json = body_json(login_response).await;
    let access_token = login_json["accessToken"].as_str().unwrap().to_string();

    // Who am I
    let me_request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", format!("Bearer {access_token}"))
        .body(Body::empty())
        .unwrap();

    let me_response = app.clone().oneshot(me_request).await.unwrap();
    assert_eq!(me_response.status(), StatusCode::OK);

    let me_json = body_json(me_response).await;
    assert_eq!(me_json["success"], true);
    assert_eq!(me_json["user"]["email"], "a@x.com");
    assert_eq!(me_json["user"]["username"], "alice");
    assert!(me_json["user"].get("password").is_none());
    assert!(me_json["user"].get("password_hash").is_none());

    // No header on the same route is still rejected
    let anonymous = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .body(Body::empty())
        .unwrap();
    let anonymous_response = app.oneshot(anonymous).await.unwrap();
    assert_eq!(anonymous_response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Profile Record Tests
// =============================================================================

async fn login_for_token(app: &axum::Router, email: &str) -> String {
    let register_request = create_json_request(
        "POST",
        "/api/v1/register",
        Some(json!({
            "username": "recorder",
            "email": email,
            "password": "secret1"
        })),
    );
    app.clone().oneshot(register_request).await.unwrap();

    let login_request = create_json_request(
        "POST",
        "/api/v1/login",
        Some(json!({
            "email": email,
            "password": "secret1"
        })),
    );
    let login_response = app.clone().oneshot(login_request).await.unwrap();
    let login_json = body_json(login_response).await;
    login_json["accessToken"].as_str().unwrap().to_string()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"));

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn sample_record_body() -> Value {
    json!({
        "name": "Jordan Park",
        "email": "jordan@example.com",
        "phone": "+1-555-0100",
        "date_of_birth": "1990-04-12",
        "status": "active",
        "authority": "staff"
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_record_crud_flow() {
    let app = create_router_for_testing();
    let token = login_for_token(&app, "crud@example.com").await;

    // Create
    let create_response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/records",
            &token,
            Some(sample_record_body()),
        ))
        .await
        .unwrap();
    assert_eq!(create_response.status(), StatusCode::CREATED);

    let created = body_json(create_response).await;
    assert_eq!(created["message"], "Record added!");
    let record_id = created["data"]["id"].as_str().unwrap().to_string();

    // List contains the record
    let list_response = app
        .clone()
        .oneshot(authed_json_request("GET", "/api/v1/records", &token, None))
        .await
        .unwrap();
    assert_eq!(list_response.status(), StatusCode::OK);

    let listed = body_json(list_response).await;
    assert!(listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == record_id.as_str()));

    // Update
    let mut updated_body = sample_record_body();
    updated_body["status"] = json!("on-leave");
    let update_response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/v1/records/{record_id}"),
            &token,
            Some(updated_body),
        ))
        .await
        .unwrap();
    assert_eq!(update_response.status(), StatusCode::OK);

    let updated = body_json(update_response).await;
    assert_eq!(updated["data"]["status"], "on-leave");

    // Delete
    let delete_response = app
        .clone()
        .oneshot(authed_json_request(
            "DELETE",
            &format!("/api/v1/records/{record_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(delete_response.status(), StatusCode::OK);

    // Second delete finds nothing
    let gone_response = app
        .oneshot(authed_json_request(
            "DELETE",
            &format!("/api/v1/records/{record_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(gone_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_unknown_record_returns_404() {
    let app = create_router_for_testing();
    let token = login_for_token(&app, "missing-record@example.com").await;

    let response = app
        .oneshot(authed_json_request(
            "PUT",
            "/api/v1/records/550e8400-e29b-41d4-a716-446655440000",
            &token,
            Some(sample_record_body()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Record not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_record_missing_fields() {
    let app = create_router_for_testing();
    let token = login_for_token(&app, "invalid-record@example.com").await;

    let mut body = sample_record_body();
    body["phone"] = json!("");

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/records",
            &token,
            Some(body),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// OpenAPI Tests
// =============================================================================

#[tokio::test]
async fn test_openapi_spec_available() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["openapi"].is_string());
    assert!(json["paths"]["/api/v1/register"].is_object());
    assert!(json["paths"]["/api/v1/login"].is_object());
}
