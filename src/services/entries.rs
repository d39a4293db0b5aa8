//! Services backing the blog and news endpoints.

use crate::domain::entry::{Entry, NewEntry};
use crate::domain::types::EntryId;
use crate::dto::entries::ListParams;
use crate::forms::entry::EntryForm;
use crate::pagination::{ListQuery, Page};
use crate::repository::{EntryReader, EntryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Normalizes the raw list parameters and returns the requested page.
///
/// Malformed `page` or `limit` values are rejected before the repository is
/// touched.
pub fn list_entries<R>(repo: &R, params: &ListParams) -> ServiceResult<Page<Entry>>
where
    R: EntryReader + ?Sized,
{
    let query = ListQuery::from_params(
        params.page(),
        params.limit(),
        params.search(),
        params.sort(),
    )?;

    repo.list_entries(&query).map_err(ServiceError::from)
}

/// Fetches a single entry.
pub fn get_entry<R>(repo: &R, id: i64) -> ServiceResult<Entry>
where
    R: EntryReader + ?Sized,
{
    let id = EntryId::new(id)?;

    repo.get_entry_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Validates the payload and stores a new entry.
pub fn create_entry<R>(repo: &R, form: EntryForm) -> ServiceResult<Entry>
where
    R: EntryWriter + ?Sized,
{
    let new_entry = NewEntry::try_from(form)?;

    repo.create_entry(&new_entry).map_err(|err| {
        log::error!("Failed to create entry: {err}");
        ServiceError::from(err)
    })
}

/// Validates the payload and replaces the title and content of an entry.
pub fn update_entry<R>(repo: &R, id: i64, form: EntryForm) -> ServiceResult<Entry>
where
    R: EntryWriter + ?Sized,
{
    let id = EntryId::new(id)?;
    let updates = NewEntry::try_from(form)?;

    repo.update_entry(id, &updates).map_err(ServiceError::from)
}

pub fn delete_entry<R>(repo: &R, id: i64) -> ServiceResult<()>
where
    R: EntryWriter + ?Sized,
{
    let id = EntryId::new(id)?;

    repo.delete_entry(id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn params(page: &str, limit: &str, search: &str, sort: &str) -> ListParams {
        ListParams {
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
            search: Some(search.to_string()),
            sort: Some(sort.to_string()),
        }
    }

    fn sample_entry(id: i64, title: &str) -> Entry {
        Entry {
            id: EntryId::new(id).expect("valid entry id"),
            title: title.to_string(),
            content: "this is content".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_form() -> EntryForm {
        EntryForm {
            title: "this is title".to_string(),
            content: "this is content".to_string(),
        }
    }

    /// Ensures a non-numeric limit never reaches the repository.
    #[test]
    fn list_rejects_bad_limit_before_store_access() {
        let mut repo = MockRepository::new();
        repo.expect_list_entries().times(0);

        let result = list_entries(&repo, &params("1", "test", "", ""));

        assert!(matches!(result, Err(ServiceError::Parse(_))));
    }

    /// Confirms the repository receives the normalized descriptor.
    #[test]
    fn list_passes_normalized_query() {
        let mut repo = MockRepository::new();
        repo.expect_list_entries()
            .withf(|query| {
                query.page() == Some(2)
                    && query.limit() == 50
                    && query.search() == "rust"
                    && query.offset() == 50
            })
            .times(1)
            .returning(|query| Ok(Page::empty(query)));

        let page = list_entries(&repo, &params("2", "99", "rust", "DESC")).expect("should list");

        assert_eq!(page.limit, 50);
        assert_eq!(page.page, 2);
    }

    /// Missing parameters fall back to the defaults.
    #[test]
    fn list_without_params_uses_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_list_entries()
            .withf(|query| query.page().is_none() && query.limit() == 10)
            .times(1)
            .returning(|query| Ok(Page::empty(query)));

        list_entries(&repo, &ListParams::default()).expect("should list");
    }

    #[test]
    fn get_missing_entry_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_entry_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_entry(&repo, 42);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn get_rejects_non_positive_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_entry_by_id().times(0);

        let result = get_entry(&repo, 0);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_validates_payload() {
        let mut repo = MockRepository::new();
        repo.expect_create_entry().times(0);
        let form = EntryForm {
            title: "ab".to_string(),
            content: "this is content".to_string(),
        };

        let result = create_entry(&repo, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_returns_stored_entry() {
        let mut repo = MockRepository::new();
        repo.expect_create_entry()
            .withf(|entry| entry.title.as_str() == "this is title")
            .times(1)
            .returning(|entry| Ok(sample_entry(1, entry.title.as_str())));

        let created = create_entry(&repo, sample_form()).expect("should create");

        assert_eq!(created.id.get(), 1);
        assert_eq!(created.title, "this is title");
    }

    #[test]
    fn update_of_missing_entry_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_entry()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = update_entry(&repo, 5, sample_form());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn delete_of_missing_entry_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_entry()
            .withf(|id| id.get() == 9)
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_entry(&repo, 9);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn storage_failures_are_reported_as_storage_errors() {
        let mut repo = MockRepository::new();
        repo.expect_delete_entry().times(1).returning(|_| {
            Err(RepositoryError::DatabaseError {
                operation: "delete",
                message: "database is locked".to_string(),
            })
        });

        let result = delete_entry(&repo, 3);

        assert!(matches!(result, Err(ServiceError::Storage(_))));
    }
}
