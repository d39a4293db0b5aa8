use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text, Timestamp};

use crate::domain::entry::Entry as DomainEntry;
use crate::domain::types::{EntryId, TypeConstraintError};

/// Row shape shared by the `blogs` and `news` tables.
#[derive(Debug, Clone, QueryableByName)]
pub struct Entry {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Timestamp)]
    pub created_at: NaiveDateTime,
}

#[derive(QueryableByName)]
pub struct EntryCount {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl TryFrom<Entry> for DomainEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EntryId::new(entry.id)?,
            title: entry.title,
            content: entry.content,
            created_at: entry.created_at.and_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn entry_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_entry = Entry {
            id: 1,
            title: "title".to_string(),
            content: "some content".to_string(),
            created_at: now,
        };

        let domain = DomainEntry::try_from(db_entry).unwrap();
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.title, "title");
        assert_eq!(domain.content, "some content");
        assert_eq!(domain.created_at.naive_utc(), now);
    }

    #[test]
    fn entry_with_invalid_id_is_rejected() {
        let db_entry = Entry {
            id: 0,
            title: "title".to_string(),
            content: "some content".to_string(),
            created_at: Utc::now().naive_utc(),
        };

        assert_eq!(
            DomainEntry::try_from(db_entry),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
