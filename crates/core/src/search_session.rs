//! Single-slot cache of the most recent catalog search.
//!
//! The session remembers the last query, its pagination cursor and every
//! title on the last fetched page, keyed by id. That is enough to serve
//! "next page" without the caller repeating the query, and to add a title
//! by id without fetching it again.
//!
//! Each successful search replaces the whole session. Entries from an
//! earlier page or an earlier query are never carried forward, so an id
//! only resolves if it was on the page the caller last saw. A failed search
//! leaves the session as it was.
//!
//! The session is plain data with `&mut self` mutators; callers that share
//! it between requests must hold one lock across each operation (the API
//! keeps it behind a `tokio::sync::Mutex`).

use std::collections::HashMap;

use crate::catalog::{Catalog, Pagination, SearchPage};
use crate::error::CoreError;
use crate::title::CatalogTitle;
use crate::types::MalId;

/// Query and cursor of the search currently held by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveSearch {
    query: String,
    pagination: Pagination,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    active: Option<ActiveSearch>,
    results: HashMap<MalId, CatalogTitle>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search the catalog and make the returned page the current session.
    pub async fn search(
        &mut self,
        catalog: &dyn Catalog,
        query: &str,
        page: u32,
    ) -> Result<SearchPage, CoreError> {
        let result = catalog.search(query, page).await?;
        self.replace(query, &result);
        Ok(result)
    }

    /// Fetch the page after the current one for the current query.
    ///
    /// Fails with [`CoreError::NoActiveSession`] before the first search and
    /// with [`CoreError::PaginationExhausted`] once the catalog reported no
    /// further pages.
    pub async fn search_next(&mut self, catalog: &dyn Catalog) -> Result<SearchPage, CoreError> {
        let (query, page) = self.next_cursor()?;
        self.search(catalog, &query, page).await
    }

    /// The query and page number `search_next` would request.
    pub fn next_cursor(&self) -> Result<(String, u32), CoreError> {
        let active = self.active.as_ref().ok_or(CoreError::NoActiveSession)?;

        if !active.pagination.has_next {
            return Err(CoreError::PaginationExhausted);
        }

        // A page past u32::MAX cannot be requested.
        let next_page = active
            .pagination
            .current_page
            .checked_add(1)
            .ok_or(CoreError::PaginationExhausted)?;

        Ok((active.query.clone(), next_page))
    }

    /// Look up a title on the current page. Never consults storage.
    pub fn resolve(&self, mal_id: MalId) -> Result<&CatalogTitle, CoreError> {
        self.results
            .get(&mal_id)
            .ok_or(CoreError::NotInSearchResults(mal_id))
    }

    /// The query of the current session, if any search has succeeded.
    pub fn query(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.query.as_str())
    }

    /// The cursor of the current page, if any search has succeeded.
    pub fn pagination(&self) -> Option<Pagination> {
        self.active.as_ref().map(|a| a.pagination)
    }

    fn replace(&mut self, query: &str, page: &SearchPage) {
        self.active = Some(ActiveSearch {
            query: query.to_string(),
            pagination: page.pagination,
        });
        self.results = page
            .data
            .iter()
            .map(|title| (title.mal_id, title.clone()))
            .collect();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
