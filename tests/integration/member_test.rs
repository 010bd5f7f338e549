//! Integration tests for profile, favorites, borrowing and health.

use http::StatusCode;
use serde_json::json;

use library_entity::user::Role;

use crate::helpers::TestApp;

async fn add_book(app: &TestApp, token: &str, isbn: &str) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/books",
            Some(json!({
                "title": "Rumah Kaca",
                "author": "Pramoedya Ananta Toer",
                "genre_id": 1,
                "isbn": isbn,
                "publication_year": 1988,
                "quantity": 2
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["book_id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_profile_get_and_update() {
    let app = TestApp::new().await;
    let token = app.token_for("gita", Role::Student).await;

    let profile = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["data"]["email"], "gita@gmail.com");

    let updated = app
        .request(
            "PUT",
            "/api/profile",
            Some(json!({ "username": "Gita Savitri" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_email_must_be_gmail_and_free() {
    let app = TestApp::new().await;
    let token = app.token_for("hana", Role::Student).await;
    app.create_user("indra", "password123", Role::Student).await;

    let not_gmail = app
        .request(
            "PUT",
            "/api/profile",
            Some(json!({ "email": "hana@yahoo.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(not_gmail.status, StatusCode::BAD_REQUEST);

    let taken = app
        .request(
            "PUT",
            "/api/profile",
            Some(json!({ "email": "indra@gmail.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_favorites_flow() {
    let app = TestApp::new().await;
    let librarian = app.token_for("joko", Role::Librarian).await;
    let book_id = add_book(&app, &librarian, "979-97312-6-6").await;

    let empty = app
        .request("GET", "/api/favorites", None, Some(&librarian))
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"].as_array().unwrap().len(), 0);

    let added = app
        .request(
            "POST",
            "/api/favorites",
            Some(json!({ "book_id": book_id })),
            Some(&librarian),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED);

    let duplicate = app
        .request(
            "POST",
            "/api/favorites",
            Some(json!({ "book_id": book_id })),
            Some(&librarian),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let unknown = app
        .request(
            "POST",
            "/api/favorites",
            Some(json!({ "book_id": 4040 })),
            Some(&librarian),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let path = format!("/api/favorites/{book_id}");
    let removed = app.request("DELETE", &path, None, Some(&librarian)).await;
    assert_eq!(removed.status, StatusCode::OK);

    let gone = app.request("DELETE", &path, None, Some(&librarian)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_has_no_favorites() {
    let app = TestApp::new().await;
    let token = app.token_for("kepala", Role::Manager).await;

    let response = app.request("GET", "/api/favorites", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_borrow_and_report() {
    let app = TestApp::new().await;
    let librarian = app.token_for("kiki", Role::Librarian).await;
    let student = app.token_for("lala", Role::Student).await;
    let book_id = add_book(&app, &librarian, "979-97312-7-4").await;

    let borrowed = app
        .request(
            "POST",
            "/api/borrowings",
            Some(json!({
                "book_id": book_id,
                "borrow_date": "2024-01-01",
                "return_date": "2024-01-08"
            })),
            Some(&student),
        )
        .await;
    assert_eq!(borrowed.status, StatusCode::CREATED);

    let report = app
        .request("GET", "/api/borrowings", None, Some(&librarian))
        .await;
    assert_eq!(report.status, StatusCode::OK);
    let entries = report.body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["days_overdue"].as_i64().unwrap() > 0);
    assert!(entries[0]["fine"].as_i64().unwrap() > 0);

    let denied = app
        .request("GET", "/api/borrowings", None, Some(&student))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_borrow_return_before_borrow_date() {
    let app = TestApp::new().await;
    let librarian = app.token_for("mira", Role::Librarian).await;
    let student = app.token_for("nina", Role::Student).await;
    let book_id = add_book(&app, &librarian, "979-97312-0-7").await;

    let response = app
        .request(
            "POST",
            "/api/borrowings",
            Some(json!({
                "book_id": book_id,
                "borrow_date": "2024-03-10",
                "return_date": "2024-03-01"
            })),
            Some(&student),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], true);
    assert_eq!(response.body["data"]["cache"], true);
}
