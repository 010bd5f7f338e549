//! Integration tests for registration, login and token admission.

use http::StatusCode;

use library_entity::user::Role;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "  Sari  ",
                "email": "sari@gmail.com",
                "password": "rahasia123"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["username"], "Sari");
    assert_eq!(response.body["data"]["role"], "Student");

    let token = app.login("sari@gmail.com", "rahasia123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.create_user("budi", "password123", Role::Student).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "Budi Lain",
                "email": "budi@gmail.com",
                "password": "password123"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_missing_fields_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "",
                "email": "kosong@gmail.com",
                "password": "password123"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_user("citra", "password123", Role::Student).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "citra@gmail.com",
                "password": "salah-total"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "tidakada@gmail.com",
                "password": "password123"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new().await;
    let token = app.token_for("dewi", Role::Student).await;

    let before = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/books", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::new().await;

    for value in ["Bearer", "Basic abc", "Bearer ", "token-without-scheme"] {
        let response = app
            .request_with_authorization("GET", "/api/books", None, Some(value))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header {value:?}");
    }
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/profile", None, Some("eyJhbGciOiJIUzI1NiJ9.e30.x"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let token = app.token_for("eka", Role::Librarian).await;

    let response = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(serde_json::json!({ "new_password": "baru-sekali" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.login("eka@gmail.com", "baru-sekali").await;
}

#[tokio::test]
async fn test_change_password_too_short() {
    let app = TestApp::new().await;
    let token = app.token_for("fajar", Role::Student).await;

    let response = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(serde_json::json!({ "new_password": "abc" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
