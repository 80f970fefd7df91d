//! The external catalog as seen by the rest of the system.
//!
//! Implemented over HTTP by `mangalib-catalog`; tests supply in-memory
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::title::CatalogTitle;
use crate::types::MalId;

/// Cursor metadata returned with every search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub has_next: bool,
}

/// One page of catalog search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<CatalogTitle>,
    pub pagination: Pagination,
}

/// Errors from a catalog lookup. They are passed to callers unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The catalog has no title with this id.
    #[error("Catalog has no manga with id {0}")]
    NotFound(MalId),

    /// The catalog answered with a non-2xx status.
    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be mapped onto a [`CatalogTitle`].
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),
}

/// Keyword search and lookup by id against the external catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search by keyword. Pages are 1-based.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError>;

    /// Fetch the current record for one title.
    async fn fetch(&self, mal_id: MalId) -> Result<CatalogTitle, CatalogError>;
}
