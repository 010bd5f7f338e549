//! User domain entities.

pub mod model;
pub mod role;

pub use model::{NewUser, Profile, ProfileUpdate, User};
pub use role::{Role, RoleSet};
