//! User role enumeration and role sets used for admission decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a library user can hold.
///
/// Roles are only consulted by the authorization gate; business logic
/// never branches on them beyond admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Runs the library: full book management and borrowing reports.
    Manager,
    /// Maintains the catalogue and keeps favorites.
    Librarian,
    /// Borrows books and keeps favorites.
    Student,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Role::Manager, Role::Librarian, Role::Student];

    /// Role assigned to self-registered accounts.
    pub const DEFAULT: Role = Role::Student;

    /// Return the identifier stored in the `roles` table.
    pub fn id(&self) -> i32 {
        match self {
            Self::Manager => 1,
            Self::Librarian => 2,
            Self::Student => 3,
        }
    }

    /// Resolve a role from its stored identifier.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Manager),
            2 => Some(Self::Librarian),
            3 => Some(Self::Student),
            _ => None,
        }
    }

    /// Return the canonical role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Librarian => "Librarian",
            Self::Student => "Student",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Manager => 0b001,
            Self::Librarian => 0b010,
            Self::Student => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = library_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "librarian" => Ok(Self::Librarian),
            "student" => Ok(Self::Student),
            _ => Err(library_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: Manager, Librarian, Student"
            ))),
        }
    }
}

impl TryFrom<i32> for Role {
    type Error = library_core::AppError;

    /// Decodes a stored `role_id`. An id outside the `roles` table is a
    /// corrupt row, not a caller error.
    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id)
            .ok_or_else(|| library_core::AppError::database(format!("Unknown role id {id}")))
    }
}

/// A closed set of roles an operation admits.
///
/// Built from [`Role`] values only, so a misspelled role name cannot
/// silently widen or narrow access.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set. An operation declaring it admits nobody.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every role.
    pub const fn all() -> Self {
        Self(0b111)
    }

    /// Return a copy of this set that also admits `role`.
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    /// Build a set from a slice of roles.
    pub fn of(roles: &[Role]) -> Self {
        roles.iter().fold(Self::empty(), |set, role| set.with(*role))
    }

    /// Membership test used by the authorization gate.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Returns `true` if no role is admitted.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over the member roles.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, role| set.with(role))
    }
}
