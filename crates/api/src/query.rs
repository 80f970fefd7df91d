//! Query parameter types for the manga endpoints.

use mangalib_core::types::MalId;
use serde::Deserialize;

/// Query parameters for `GET /manga/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    /// 1-based page; defaults to the first page.
    pub page: Option<u32>,
}

/// Query parameters for `POST /manga` (add a title from the last search).
#[derive(Debug, Deserialize)]
pub struct AddParams {
    pub mal_id: MalId,
}
