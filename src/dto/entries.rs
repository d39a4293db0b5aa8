//! DTOs exposed by the entry list endpoints.

use serde::Deserialize;

/// Raw query parameters accepted by the `/v1/{blogs,news}` list endpoints.
///
/// Values are kept as strings; [`crate::pagination::ListQuery`] is
/// responsible for parsing and bounding them.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> &str {
        self.page.as_deref().unwrap_or_default()
    }

    pub fn limit(&self) -> &str {
        self.limit.as_deref().unwrap_or_default()
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or_default()
    }
}
