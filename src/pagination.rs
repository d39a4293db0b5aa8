//! List query normalization and page metadata.
//!
//! Raw `page`, `limit`, `search` and `sort` strings coming from the query
//! string are turned into a [`ListQuery`]. The repository layer consumes it to
//! build bounded listings, and [`Page`] carries the result back out.

use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

use serde::Serialize;
use thiserror::Error;

/// Number of items per page when the caller does not provide a limit.
pub const DEFAULT_SIZE: i64 = 10;

/// Upper bound for the number of items per page.
pub const MAX_SIZE: i64 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid page: {0}")]
    InvalidPage(ParseIntError),

    #[error("invalid limit: {0}")]
    InvalidLimit(ParseIntError),

    /// Page metadata was requested for a zero page size.
    #[error("page size must be greater than zero")]
    ZeroLimit,
}

/// Direction applied to the `created_at` ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Interprets a raw sort token.
    ///
    /// Only the empty string and the exact spellings `asc`/`ASC` select
    /// ascending order. Anything else, including unknown tokens, sorts
    /// descending.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "" | "asc" | "ASC" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Normalized pagination, search and sort parameters for one list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    limit: i64,
    page: Option<i64>,
    search: String,
    sort: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SIZE,
            page: None,
            search: String::new(),
            sort: String::new(),
        }
    }
}

impl ListQuery {
    /// Builds a descriptor from raw query string values.
    ///
    /// The page is parsed before the limit, so a request carrying two bad
    /// values reports the page.
    pub fn from_params(
        page: &str,
        limit: &str,
        search: &str,
        sort: &str,
    ) -> Result<Self, PaginationError> {
        let mut query = Self::default();
        query.set_page(page)?;
        query.set_limit(limit)?;
        query.set_sort(sort);
        query.set_search(search);
        Ok(query)
    }

    /// Sets the page size. Empty input selects [`DEFAULT_SIZE`]; negative
    /// values and values above [`MAX_SIZE`] are clamped to [`MAX_SIZE`].
    pub fn set_limit(&mut self, raw: &str) -> Result<(), PaginationError> {
        if raw.is_empty() {
            self.limit = DEFAULT_SIZE;
            return Ok(());
        }

        let value = raw
            .parse::<i64>()
            .map_err(PaginationError::InvalidLimit)?;

        self.limit = if !(0..=MAX_SIZE).contains(&value) {
            MAX_SIZE
        } else {
            value
        };

        Ok(())
    }

    /// Sets the requested page. Empty input leaves the page unset.
    pub fn set_page(&mut self, raw: &str) -> Result<(), PaginationError> {
        if raw.is_empty() {
            return Ok(());
        }

        let value = raw.parse::<i64>().map_err(PaginationError::InvalidPage)?;
        self.page = Some(value);

        Ok(())
    }

    pub fn set_sort(&mut self, raw: &str) {
        self.sort = raw.to_string();
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.to_string();
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> Option<i64> {
        self.page
    }

    /// The page echoed back to clients, `0` when none was requested.
    pub fn effective_page(&self) -> i64 {
        self.page.unwrap_or(0)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortOrder {
        SortOrder::from_raw(&self.sort)
    }

    /// Number of rows to skip. Unset, zero and negative pages start at the
    /// first row.
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) if page > 0 => (page - 1).saturating_mul(self.limit),
            _ => 0,
        }
    }

    pub fn query_string(&self) -> String {
        format!(
            "page={}&limit={}&sort={}",
            self.effective_page(),
            self.limit,
            self.sort()
        )
    }
}

/// Number of pages needed to show `total_count` rows, `limit` rows at a time.
///
/// `limit` must be positive.
pub fn total_pages(total_count: i64, limit: i64) -> Result<i64, PaginationError> {
    if limit == 0 {
        return Err(PaginationError::ZeroLimit);
    }
    Ok((total_count as f64 / limit as f64).ceil() as i64)
}

/// Whether a page after `page` exists. Uses truncating integer division, so
/// the answer differs from [`total_pages`] when `total_count` is not a
/// multiple of `limit`.
///
/// `limit` must be positive.
pub fn has_more(page: i64, total_count: i64, limit: i64) -> Result<bool, PaginationError> {
    if limit == 0 {
        return Err(PaginationError::ZeroLimit);
    }
    Ok(page < total_count / limit)
}

/// One bounded slice of a listing together with its count metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub total_count: i64,
    pub total_page: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Page returned when nothing matches the query.
    pub fn empty(query: &ListQuery) -> Self {
        Self {
            total_count: 0,
            total_page: 0,
            page: query.effective_page(),
            limit: query.limit(),
            has_more: false,
            items: Vec::new(),
        }
    }

    pub fn new(items: Vec<T>, total_count: i64, query: &ListQuery) -> Result<Self, PaginationError> {
        let page = query.effective_page();
        let limit = query.limit();

        Ok(Self {
            total_count,
            total_page: total_pages(total_count, limit)?,
            page,
            limit,
            has_more: has_more(page, total_count, limit)?,
            items,
        })
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total_count: self.total_count,
            total_page: self.total_page,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<U>, E>>()?;
        Ok(Page {
            total_count: self.total_count,
            total_page: self.total_page,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_of(raw: &str) -> i64 {
        let mut query = ListQuery::default();
        query.set_limit(raw).unwrap();
        query.limit()
    }

    #[test]
    fn limit_within_bounds_is_kept() {
        for value in [0, 1, 10, 49, 50] {
            assert_eq!(limit_of(&value.to_string()), value);
        }
    }

    #[test]
    fn limit_out_of_bounds_is_clamped_to_max() {
        for value in [-1, -100, 51, 1000] {
            assert_eq!(limit_of(&value.to_string()), MAX_SIZE);
        }
    }

    #[test]
    fn empty_limit_uses_default() {
        assert_eq!(limit_of(""), DEFAULT_SIZE);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        let mut query = ListQuery::default();
        assert!(matches!(
            query.set_limit("test"),
            Err(PaginationError::InvalidLimit(_))
        ));
    }

    #[test]
    fn empty_page_stays_unset() {
        let mut query = ListQuery::default();
        query.set_page("").unwrap();
        assert_eq!(query.page(), None);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.effective_page(), 0);
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let mut query = ListQuery::default();
        assert!(matches!(
            query.set_page("two"),
            Err(PaginationError::InvalidPage(_))
        ));
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let query = ListQuery::from_params("1", "10", "", "").unwrap();
        assert_eq!(query.offset(), 0);

        let query = ListQuery::from_params("3", "10", "", "").unwrap();
        assert_eq!(query.offset(), 20);

        let query = ListQuery::from_params("0", "10", "", "").unwrap();
        assert_eq!(query.offset(), 0);

        let query = ListQuery::from_params("-2", "10", "", "").unwrap();
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn sort_defaults_and_normalizes() {
        for raw in ["", "asc", "ASC"] {
            let query = ListQuery::from_params("", "", "", raw).unwrap();
            assert_eq!(query.sort(), SortOrder::Asc, "{raw}");
        }
        for raw in ["desc", "DESC", "xyz", "Asc"] {
            let query = ListQuery::from_params("", "", "", raw).unwrap();
            assert_eq!(query.sort(), SortOrder::Desc, "{raw}");
        }
    }

    #[test]
    fn page_error_is_reported_before_limit_error() {
        assert!(matches!(
            ListQuery::from_params("x", "y", "", ""),
            Err(PaginationError::InvalidPage(_))
        ));
    }

    #[test]
    fn search_is_kept_verbatim() {
        let query = ListQuery::from_params("", "", "  50% off ' --", "").unwrap();
        assert_eq!(query.search(), "  50% off ' --");
    }

    #[test]
    fn query_string_uses_normalized_values() {
        let query = ListQuery::from_params("2", "500", "", "whatever").unwrap();
        assert_eq!(query.query_string(), "page=2&limit=50&sort=DESC");
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), Ok(0));
        assert_eq!(total_pages(25, 10), Ok(3));
        assert_eq!(total_pages(20, 10), Ok(2));
        assert_eq!(total_pages(1, 50), Ok(1));
    }

    #[test]
    fn has_more_uses_integer_division() {
        assert_eq!(has_more(1, 25, 10), Ok(true));
        assert_eq!(has_more(2, 20, 10), Ok(false));
        // 25 rows span three pages but 25 / 10 truncates to 2.
        assert_eq!(has_more(2, 25, 10), Ok(false));
        assert_eq!(has_more(0, 5, 10), Ok(false));
    }

    #[test]
    fn zero_limit_is_a_precondition_violation() {
        assert_eq!(total_pages(5, 0), Err(PaginationError::ZeroLimit));
        assert_eq!(has_more(1, 5, 0), Err(PaginationError::ZeroLimit));
    }

    #[test]
    fn page_metadata_is_computed_from_query() {
        let query = ListQuery::from_params("1", "10", "", "asc").unwrap();
        let page = Page::new(vec![1, 2], 2, &query).unwrap();

        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_page, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert!(!page.has_more);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn empty_page_serializes_items_as_empty_list() {
        let query = ListQuery::default();
        let page: Page<u8> = Page::empty(&query);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "total_count": 0,
                "total_page": 0,
                "page": 0,
                "limit": 10,
                "has_more": false,
                "items": [],
            })
        );
    }
}
