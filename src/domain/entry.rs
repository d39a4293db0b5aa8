use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::EntryId;

/// The two resources served by the API. Both share the [`Entry`] shape and
/// differ only in their backing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Blog,
    News,
}

impl EntryKind {
    pub const fn table(self) -> &'static str {
        match self {
            EntryKind::Blog => "blogs",
            EntryKind::News => "news",
        }
    }
}

/// A stored blog post or news item.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Payload used to create or replace an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
}

impl NewEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
