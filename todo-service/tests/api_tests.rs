mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_and_ping() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert!(body["time"].is_string());

    let response = app.get("/api/ping").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "secret12"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    // The stored hash must never leak through the API
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Someone Else",
            "email": "ada@example.com",
            "password": "other-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already in use"));
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "not-an-email",
            "password": "secret12"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_blank_name() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "   ",
            "email": "ada@example.com",
            "password": "secret12"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_returns_working_token() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;
    assert!(!token.is_empty());

    // The minted token passes the bearer gate on a protected route.
    let response = app
        .get_authenticated("/api/todos", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert!(user_id > 0);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "secret12"}))
        .send()
        .await
        .expect("Failed to execute request");

    // Same status, same body: no oracle for which check failed.
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password["data"], unknown_email["data"]);
}

#[tokio::test]
async fn test_todos_require_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/todos").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todos_reject_non_bearer_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/todos")
        .header("Authorization", "Basic xyz")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todos_reject_expired_token() {
    let app = TestApp::spawn().await;

    let (user_id, _token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .get_authenticated("/api/todos", &app.expired_token_for(user_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_todos_reject_tampered_token() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    // Change one character of the payload segment.
    let segments: Vec<&str> = token.split('.').collect();
    let mut payload = segments[1].to_string();
    let original = payload.remove(0);
    let flipped = if original == 'A' { 'B' } else { 'A' };
    payload.insert(0, flipped);
    let tampered = format!("{}.{}.{}", segments[0], payload, segments[2]);

    let response = app
        .get_authenticated("/api/todos", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Same undifferentiated message as for an expired token.
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_create_and_list_todos() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .post_authenticated("/api/todos", &token)
        .json(&json!({"title": "buy milk"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "buy milk");
    assert_eq!(body["data"]["completed"], false);
    assert_eq!(body["data"]["user_id"], user_id.to_string());

    app.post_authenticated("/api/todos", &token)
        .json(&json!({"title": "walk dog"}))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/api/todos", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let todos = body["data"].as_array().unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["title"], "buy milk");
    assert_eq!(todos[1]["title"], "walk dog");
}

#[tokio::test]
async fn test_create_todo_blank_title() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .post_authenticated("/api/todos", &token)
        .json(&json!({"title": "   "}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_todos_are_scoped_per_user() {
    let app = TestApp::spawn().await;

    let (_ada_id, ada_token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;
    let (_alan_id, alan_token) = app
        .register_and_login("Alan Turing", "alan@example.com", "secret34")
        .await;

    app.post_authenticated("/api/todos", &ada_token)
        .json(&json!({"title": "write program"}))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/api/todos", &alan_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let response = app
        .get_authenticated("/api/todos", &ada_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_minted_token_matches_login_token_claims() {
    let app = TestApp::spawn().await;

    let (user_id, _token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    // A token minted directly with the shared secret is honored by the gate.
    let response = app
        .get_authenticated("/api/todos", &app.token_for(user_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_users_is_public() {
    let app = TestApp::spawn().await;

    app.register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app.get("/api/users").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "ada@example.com");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::spawn().await;

    let (user_id, _token) = app
        .register_and_login("Ada Lovelace", "ada@example.com", "secret12")
        .await;

    let response = app
        .get(&format!("/api/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/not-a-number")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/9999")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
