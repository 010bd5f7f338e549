//! Borrowing and overdue fine configuration.

use serde::{Deserialize, Serialize};

/// Borrowing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingConfig {
    /// Fine charged per full day past the return date, in the smallest
    /// currency unit. Formatting is left to clients.
    #[serde(default = "default_fine_per_day")]
    pub fine_per_day: i64,
}

impl Default for BorrowingConfig {
    fn default() -> Self {
        Self {
            fine_per_day: default_fine_per_day(),
        }
    }
}

fn default_fine_per_day() -> i64 {
    20000
}
