//! Registration, login, logout and password changes.

pub mod service;

pub use service::{AuthService, LoginOutcome, Registration};
