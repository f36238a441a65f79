mod common;

use auth::Role;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .register("Alice", "alice@x.com", "secret1", Some("user"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_register_unknown_role_becomes_user() {
    let app = TestApp::spawn().await;

    let response = app
        .register("Bob", "bob@x.com", "secret1", Some("superuser"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "user");

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Carol",
            "email": "carol@x.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Alice", "alice@x.com", "secret1", None).await;
    let response = app
        .register("Alice Again", "alice@x.com", "secret2", None)
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already registered");
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let cases = [
        ("   ", "alice@x.com", "secret1", "name"),
        ("Alice", "not-an-email", "secret1", "email"),
        ("Alice", "alice@x.com", "12345", "password"),
    ];

    for (name, email, password, field) in cases {
        let response = app.register(name, email, password, None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains(field));
    }

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_registration_stores_one_identity() {
    let app = TestApp::spawn().await;

    let requests = (0..8).map(|i| {
        app.post("/api/v1/auth/register")
            .json(&json!({
                "name": format!("Racer {}", i),
                "email": "race@x.com",
                "password": "secret1"
            }))
            .send()
    });

    let mut created = 0;
    let mut conflicts = 0;
    for response in spawn_all(requests).await {
        match response.expect("Failed to execute request").status() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            status => panic!("unexpected status {status}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(app.repository.len().await, 1);
}

/// Drive request futures concurrently on separate tasks.
async fn spawn_all<F>(
    requests: impl Iterator<Item = F>,
) -> Vec<Result<reqwest::Response, reqwest::Error>>
where
    F: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'static,
{
    let handles: Vec<_> = requests.map(tokio::spawn).collect();

    let mut responses = Vec::with_capacity(handles.len());
    for handle in handles {
        responses.push(handle.await.expect("Request task panicked"));
    }
    responses
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let body: serde_json::Value = app
        .register("Alice", "alice@x.com", "secret1", Some("user"))
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let identity_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app.login("alice@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.token_service.validate(token).expect("Token should be valid");
    assert_eq!(claims.sub, identity_id);
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@x.com", "secret1", None).await;

    let wrong_password = app.login("alice@x.com", "secret2").await;
    let unknown_email = app.login("nobody@x.com", "secret1").await;
    let invalid_email = app.login("not-an-email", "secret1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    let invalid_email: serde_json::Value = invalid_email.json().await.unwrap();

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password, invalid_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@x.com", "secret1", None).await;

    let response = app.login("Alice@x.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_validate_token() {
    let app = TestApp::spawn().await;
    let (identity_id, token) = app.register_and_login("alice@x.com", "admin").await;

    let response = app
        .get_authenticated("/api/v1/auth/validate", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_id"], identity_id.as_str());
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["iss"], "Auth Service");
    assert!(body["data"]["exp"].as_i64().unwrap() > body["data"]["iat"].as_i64().unwrap());
}

#[tokio::test]
async fn test_validate_token_rejections() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/api/v1/auth/validate")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = missing.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Missing Authorization header");

    let wrong_scheme = app
        .get("/api/v1/auth/validate")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = wrong_scheme.json().await.unwrap();
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Bearer <token>"));

    let garbage = app
        .get_authenticated("/api/v1/auth/validate", "abc")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = garbage.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let (identity_id, _) = app.register_and_login("alice@x.com", "user").await;

    let expired = app
        .token_service
        .issue_at(identity_id.as_str(), Role::User, Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .get_authenticated("/api/v1/me", &expired.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_identity() {
    let app = TestApp::spawn().await;
    let (identity_id, token) = app.register_and_login("alice@x.com", "user").await;

    let response = app
        .get_authenticated("/api/v1/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], identity_id.as_str());
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn test_current_identity_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_route_forbidden_for_user() {
    let app = TestApp::spawn().await;
    let (identity_id, token) = app.register_and_login("alice@x.com", "user").await;

    let response = app
        .get_authenticated(&format!("/api/v1/admin/identities/{}", identity_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 403);
    assert_eq!(body["data"]["message"], "Insufficient permissions");
}

#[tokio::test]
async fn test_admin_route_for_admin() {
    let app = TestApp::spawn().await;
    let (user_id, _) = app.register_and_login("alice@x.com", "user").await;
    let (_, admin_token) = app.register_and_login("root@x.com", "admin").await;

    let response = app
        .get_authenticated(&format!("/api/v1/admin/identities/{}", user_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@x.com");

    let unknown = app
        .get_authenticated(
            &format!("/api/v1/admin/identities/{}", uuid::Uuid::new_v4()),
            &admin_token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = app
        .get_authenticated("/api/v1/admin/identities/42", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_admin_route_rejects_foreign_token() {
    let app = TestApp::spawn().await;
    let (identity_id, _) = app.register_and_login("root@x.com", "admin").await;

    let foreign = auth::TokenService::new(
        &auth::SigningSecret::new("a-different-secret-of-at-least-32-bytes").unwrap(),
    )
    .issue(identity_id.as_str(), Role::Admin)
    .unwrap();

    let response = app
        .get_authenticated(
            &format!("/api/v1/admin/identities/{}", identity_id),
            &foreign.access_token,
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
