//! Identifiers for registry entities

use serde::{Deserialize, Serialize};

/// Unique identifier for an account schedule within a registry.
///
/// Ids are assigned in registry order, so comparing two ids also compares
/// their position in the fixed account ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u16);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account_{}", self.0)
    }
}
