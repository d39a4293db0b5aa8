//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are checked on construction so that once an id reaches the
//! repository it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in an entry title.
pub const TITLE_MIN_LEN: u64 = 3;
/// Maximum number of characters in an entry title.
pub const TITLE_MAX_LEN: u64 = 255;
/// Minimum number of characters in an entry body.
pub const CONTENT_MIN_LEN: u64 = 10;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
}

/// Unique identifier of a blog post or news item. Matches SQLite's 64-bit
/// rowid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntryId(i64);

impl EntryId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for EntryId {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for i64 {
    fn from(value: EntryId) -> Self {
        value.0
    }
}
