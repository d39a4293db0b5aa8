//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::entry::{Entry, NewEntry};
use crate::domain::types::EntryId;
use crate::pagination::{ListQuery, Page};
use crate::repository::errors::RepositoryResult;
use crate::repository::{EntryReader, EntryWriter};

mock! {
    pub Repository {}

    impl EntryReader for Repository {
        fn get_entry_by_id(&self, id: EntryId) -> RepositoryResult<Option<Entry>>;
        fn list_entries(&self, query: &ListQuery) -> RepositoryResult<Page<Entry>>;
    }

    impl EntryWriter for Repository {
        fn create_entry(&self, new_entry: &NewEntry) -> RepositoryResult<Entry>;
        fn update_entry(&self, id: EntryId, updates: &NewEntry) -> RepositoryResult<Entry>;
        fn delete_entry(&self, id: EntryId) -> RepositoryResult<()>;
    }
}
