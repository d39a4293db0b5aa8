//! SQL assembly for entry tables and the list algorithm built on top of it.
//!
//! Every table gets its statements formatted once in [`EntryQueries::new`].
//! A list request is turned into a [`ListPlan`] holding the count and select
//! statements plus the values to bind, and [`fetch_page`] runs that plan
//! through a [`PlanExecutor`] within a [`Deadline`].

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::models::entry::{Entry as DbEntry, EntryCount};
use crate::pagination::{ListQuery, Page};
use crate::repository::deadline::Deadline;
use crate::repository::errors::{DuringOperation, RepositoryResult};

/// Columns selected for every entry row.
pub const ENTRY_FIELDS: &str = "id, title, content, created_at";

/// Immutable statement templates for one entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQueries {
    table: &'static str,
    create: String,
    update: String,
    delete: String,
    get_by_id: String,
    count: String,
    select: String,
}

impl EntryQueries {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            create: format!(
                "INSERT INTO {table} (title, content) VALUES (?, ?) RETURNING {ENTRY_FIELDS}"
            ),
            update: format!(
                "UPDATE {table} SET title = ?, content = ? WHERE id = ? RETURNING {ENTRY_FIELDS}"
            ),
            delete: format!("DELETE FROM {table} WHERE id = ?"),
            get_by_id: format!("SELECT {ENTRY_FIELDS} FROM {table} WHERE id = ?"),
            count: format!("SELECT COUNT(id) AS count FROM {table} WHERE 1=1"),
            select: format!("SELECT {ENTRY_FIELDS} FROM {table} WHERE 1=1"),
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn create(&self) -> &str {
        &self.create
    }

    pub fn update(&self) -> &str {
        &self.update
    }

    pub fn delete(&self) -> &str {
        &self.delete
    }

    pub fn get_by_id(&self) -> &str {
        &self.get_by_id
    }

    /// Builds the count and select statements for a list request.
    ///
    /// The search term is bound as a parameter, never spliced into the text.
    pub fn plan(&self, query: &ListQuery) -> ListPlan {
        let mut count_sql = self.count.clone();
        let mut select_sql = self.select.clone();

        let search_pattern = if query.search().is_empty() {
            None
        } else {
            count_sql.push_str(" AND title LIKE ?");
            select_sql.push_str(" AND title LIKE ?");
            Some(format!("%{}%", query.search()))
        };

        let sort = query.sort().as_sql();
        select_sql.push_str(&format!(
            " ORDER BY created_at {sort}, id {sort} LIMIT ? OFFSET ?"
        ));

        ListPlan {
            count_sql,
            select_sql,
            search_pattern,
            limit: query.limit(),
            offset: query.offset(),
        }
    }
}

/// Statements and bind values for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    pub count_sql: String,
    pub select_sql: String,
    /// `LIKE` pattern bound to both statements when a search was requested.
    pub search_pattern: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Storage collaborator able to run a [`ListPlan`].
pub trait PlanExecutor {
    type Row;

    fn count(&mut self, plan: &ListPlan) -> RepositoryResult<i64>;

    /// Runs the select statement. Rows are returned in database order.
    fn select(&mut self, plan: &ListPlan) -> RepositoryResult<Vec<Self::Row>>;
}

impl PlanExecutor for SqliteConnection {
    type Row = DbEntry;

    fn count(&mut self, plan: &ListPlan) -> RepositoryResult<i64> {
        let mut statement = diesel::sql_query(plan.count_sql.as_str()).into_boxed::<Sqlite>();
        if let Some(pattern) = &plan.search_pattern {
            statement = statement.bind::<Text, _>(pattern.clone());
        }

        let row = statement.get_result::<EntryCount>(self).during("list")?;
        Ok(row.count)
    }

    fn select(&mut self, plan: &ListPlan) -> RepositoryResult<Vec<DbEntry>> {
        let mut statement = diesel::sql_query(plan.select_sql.as_str()).into_boxed::<Sqlite>();
        if let Some(pattern) = &plan.search_pattern {
            statement = statement.bind::<Text, _>(pattern.clone());
        }

        statement
            .bind::<BigInt, _>(plan.limit)
            .bind::<BigInt, _>(plan.offset)
            .load::<DbEntry>(self)
            .during("list")
    }
}

/// Runs the count first and skips the select when nothing matches. Neither
/// statement is started once `deadline` has passed.
pub fn fetch_page<E>(
    executor: &mut E,
    query: &ListQuery,
    plan: &ListPlan,
    deadline: &Deadline,
) -> RepositoryResult<Page<E::Row>>
where
    E: PlanExecutor + ?Sized,
{
    deadline.check("list")?;
    let total_count = executor.count(plan)?;

    if total_count == 0 {
        return Ok(Page::empty(query));
    }

    deadline.check("list")?;
    let items = executor.select(plan)?;

    Ok(Page::new(items, total_count, query)?)
}
