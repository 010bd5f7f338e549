//! # library-auth
//!
//! Authentication and authorization for the library API.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-bounded token issuance and verification
//! - `revocation`: key-value backed registry of revoked tokens
//! - `gate`: per-request admission decisions
//! - `password`: Argon2id password hashing and length policy

pub mod gate;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use gate::{Admission, AuthFailure, AuthorizationGate};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
pub use revocation::RevocationRegistry;
