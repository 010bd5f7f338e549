//! HTTP-level integration tests.
//!
//! Each test drives the full router through `tower::ServiceExt::oneshot`
//! against the in-memory relational store and the in-memory cache.

mod auth_test;
mod book_test;
mod helpers;
mod member_test;
