//! Revocation of tokens before their natural expiry.

pub mod registry;

pub use registry::RevocationRegistry;
