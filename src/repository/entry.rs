//! Diesel implementation of the entry repository traits.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use crate::{
    domain::{
        entry::{Entry, NewEntry},
        types::EntryId,
    },
    models::entry::Entry as DbEntry,
    pagination::{ListQuery, Page},
    repository::{
        DieselRepository, EntryReader, EntryWriter,
        errors::{DuringOperation, RepositoryError, RepositoryResult},
        planner::fetch_page,
    },
};

impl EntryReader for DieselRepository {
    fn get_entry_by_id(&self, id: EntryId) -> RepositoryResult<Option<Entry>> {
        let mut conn = self.conn("get")?;

        let entry = diesel::sql_query(self.queries().get_by_id())
            .bind::<BigInt, _>(id.get())
            .get_result::<DbEntry>(&mut conn)
            .optional()
            .during("get")?;

        entry
            .map(Entry::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_entries(&self, query: &ListQuery) -> RepositoryResult<Page<Entry>> {
        let mut conn = self.conn("list")?;

        let plan = self.queries().plan(query);
        let page = fetch_page(&mut *conn, query, &plan, self.deadline()).map_err(|err| {
            log::error!(
                "Failed to list {} with {}: {err}",
                self.queries().table(),
                query.query_string()
            );
            err
        })?;

        page.try_map(Entry::try_from).map_err(RepositoryError::from)
    }
}

impl EntryWriter for DieselRepository {
    fn create_entry(&self, new_entry: &NewEntry) -> RepositoryResult<Entry> {
        let mut conn = self.conn("create")?;

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::sql_query(self.queries().create())
                .bind::<Text, _>(new_entry.title.as_str())
                .bind::<Text, _>(new_entry.content.as_str())
                .get_result::<DbEntry>(conn)
                .during("create")?;
            self.deadline().check("create")?;
            Ok(row)
        })?;

        Ok(Entry::try_from(created)?)
    }

    fn update_entry(&self, id: EntryId, updates: &NewEntry) -> RepositoryResult<Entry> {
        let mut conn = self.conn("update")?;

        let updated = conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::sql_query(self.queries().update())
                .bind::<Text, _>(updates.title.as_str())
                .bind::<Text, _>(updates.content.as_str())
                .bind::<BigInt, _>(id.get())
                .get_result::<DbEntry>(conn)
                .during("update")?;
            self.deadline().check("update")?;
            Ok(row)
        })?;

        Ok(Entry::try_from(updated)?)
    }

    fn delete_entry(&self, id: EntryId) -> RepositoryResult<()> {
        let mut conn = self.conn("delete")?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::sql_query(self.queries().delete())
                .bind::<BigInt, _>(id.get())
                .execute(conn)
                .during("delete")?;
            self.deadline().check("delete")?;
            Ok(affected)
        })?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
