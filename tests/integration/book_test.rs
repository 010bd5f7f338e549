//! Integration tests for the book catalogue and its cached listing.

use std::time::Duration;

use http::StatusCode;
use serde_json::{Value, json};

use library_core::config::CacheTtlConfig;
use library_entity::user::Role;

use crate::helpers::TestApp;

fn book(title: &str, isbn: &str) -> Value {
    json!({
        "title": title,
        "author": "Pramoedya Ananta Toer",
        "cover": "covers/bumi.jpg",
        "genre_id": 1,
        "isbn": isbn,
        "publication_year": 1980,
        "quantity": 3
    })
}

#[tokio::test]
async fn test_empty_catalogue_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for("siswa", Role::Student).await;

    let response = app.request("GET", "/api/books", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_librarian_adds_book() {
    let app = TestApp::new().await;
    let token = app.token_for("pustakawan", Role::Librarian).await;

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(book("Bumi Manusia", "978-979-97312-3-4")),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["title"], "Bumi Manusia");
    assert_eq!(response.body["data"]["genre"], "Novel");

    let id = response.body["data"]["book_id"].as_i64().unwrap();
    let fetched = app
        .request("GET", &format!("/api/books/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["isbn"], "978-979-97312-3-4");
}

#[tokio::test]
async fn test_student_cannot_add_book() {
    let app = TestApp::new().await;
    let token = app.token_for("siswa", Role::Student).await;

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(book("Laskar Pelangi", "979-3062-79-7")),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_add_book_validation() {
    let app = TestApp::new().await;
    let token = app.token_for("pustakawan", Role::Librarian).await;

    let mut body = book("", "979-3062-79-7");
    body["quantity"] = json!(-1);
    let response = app
        .request("POST", "/api/books", Some(body), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(json!({ "title": "Tanpa Field Lain" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_manager_updates_book() {
    let app = TestApp::new().await;
    let librarian = app.token_for("pustakawan", Role::Librarian).await;
    let manager = app.token_for("kepala", Role::Manager).await;

    let created = app
        .request(
            "POST",
            "/api/books",
            Some(book("Gadis Pantai", "979-97312-8-2")),
            Some(&librarian),
        )
        .await;
    let id = created.body["data"]["book_id"].as_i64().unwrap();
    let path = format!("/api/books/{id}");

    let denied = app
        .request("PUT", &path, Some(json!({ "quantity": 9 })), Some(&librarian))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let updated = app
        .request(
            "PUT",
            &path,
            Some(json!({ "quantity": 9, "title": "" })),
            Some(&manager),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["quantity"], 9);
    assert_eq!(updated.body["data"]["title"], "Gadis Pantai");
}

#[tokio::test]
async fn test_delete_book() {
    let app = TestApp::new().await;
    let token = app.token_for("pustakawan", Role::Librarian).await;

    let created = app
        .request(
            "POST",
            "/api/books",
            Some(book("Arus Balik", "979-97312-9-0")),
            Some(&token),
        )
        .await;
    let id = created.body["data"]["book_id"].as_i64().unwrap();
    let path = format!("/api/books/{id}");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_and_genre() {
    let app = TestApp::new().await;
    let token = app.token_for("pustakawan", Role::Librarian).await;
    app.request(
        "POST",
        "/api/books",
        Some(book("Anak Semua Bangsa", "979-97312-4-X")),
        Some(&token),
    )
    .await;

    let found = app
        .request("GET", "/api/books/search?title=semua", None, Some(&token))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"].as_array().unwrap().len(), 1);

    let missing = app
        .request("GET", "/api/books/search?title=tidak-ada", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let blank = app
        .request("GET", "/api/books/search?title=", None, Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let novels = app
        .request("GET", "/api/books/genre/1", None, Some(&token))
        .await;
    assert_eq!(novels.status, StatusCode::OK);

    let history = app
        .request("GET", "/api/books/genre/3", None, Some(&token))
        .await;
    assert_eq!(history.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_list_is_stale_until_ttl_expires() {
    let app = TestApp::with_ttls(CacheTtlConfig {
        books_seconds: 1,
        ..CacheTtlConfig::default()
    })
    .await;
    let token = app.token_for("pustakawan", Role::Librarian).await;

    app.request(
        "POST",
        "/api/books",
        Some(book("Bumi Manusia", "979-97312-3-1")),
        Some(&token),
    )
    .await;

    let first = app.request("GET", "/api/books", None, Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"].as_array().unwrap().len(), 1);

    app.request(
        "POST",
        "/api/books",
        Some(book("Jejak Langkah", "979-97312-5-8")),
        Some(&token),
    )
    .await;

    let cached = app.request("GET", "/api/books", None, Some(&token)).await;
    assert_eq!(cached.body["data"].as_array().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let fresh = app.request("GET", "/api/books", None, Some(&token)).await;
    assert_eq!(fresh.body["data"].as_array().unwrap().len(), 2);
}
