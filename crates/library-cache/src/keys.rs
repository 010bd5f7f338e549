//! Cache key builders.
//!
//! Every key the application writes is built here. Per-user keys embed the
//! user id so distinct users never share an entry. The Redis provider adds
//! its configured namespace prefix on top.

/// Key of the full book list.
pub fn books_all() -> String {
    "books:all".to_string()
}

/// Key of a user's favorite books.
pub fn favorite_books(user_id: i64) -> String {
    format!("favorite_books:{user_id}")
}

/// Key of a user's profile.
pub fn profile(user_id: i64) -> String {
    format!("profile:{user_id}")
}

/// Key of a revocation entry, addressed by token fingerprint.
pub fn revoked_token(fingerprint: &str) -> String {
    format!("blacklist:{fingerprint}")
}
