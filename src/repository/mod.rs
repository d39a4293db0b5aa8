use std::sync::Arc;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        entry::{Entry, EntryKind, NewEntry},
        types::EntryId,
    },
    pagination::{ListQuery, Page},
    repository::{deadline::Deadline, errors::RepositoryResult, planner::EntryQueries},
};

pub mod deadline;
pub mod entry;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod planner;

/// Diesel-backed repository bound to one entry table.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    queries: Arc<EntryQueries>,
    deadline: Deadline,
}

impl DieselRepository {
    pub fn new(pool: DbPool, kind: EntryKind) -> Self {
        Self {
            pool,
            queries: Arc::new(EntryQueries::new(kind.table())),
            deadline: Deadline::none(),
        }
    }

    /// Returns a handle whose calls stop starting statements after `deadline`.
    /// Writes that finish after it are rolled back.
    #[must_use]
    pub fn with_deadline(&self, deadline: Deadline) -> Self {
        Self {
            deadline,
            ..self.clone()
        }
    }

    pub fn queries(&self) -> &EntryQueries {
        &self.queries
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    fn conn(&self, operation: &'static str) -> RepositoryResult<DbConnection> {
        self.deadline.check(operation)?;
        Ok(get_connection(&self.pool)?)
    }
}

pub trait EntryReader {
    fn get_entry_by_id(&self, id: EntryId) -> RepositoryResult<Option<Entry>>;
    fn list_entries(&self, query: &ListQuery) -> RepositoryResult<Page<Entry>>;
}

pub trait EntryWriter {
    fn create_entry(&self, new_entry: &NewEntry) -> RepositoryResult<Entry>;
    fn update_entry(&self, id: EntryId, updates: &NewEntry) -> RepositoryResult<Entry>;
    fn delete_entry(&self, id: EntryId) -> RepositoryResult<()>;
}
