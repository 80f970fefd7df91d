use crate::catalog::CatalogError;
use crate::progress::ProgressError;
use crate::types::MalId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: MalId },

    #[error("Cannot fetch next page: no initial search has been performed")]
    NoActiveSession,

    #[error("Cannot fetch next page: already at the last page of results")]
    PaginationExhausted,

    #[error("Manga with id {0} is not in the current search results, search again")]
    NotInSearchResults(MalId),

    #[error(transparent)]
    InvalidProgressUpdate(#[from] ProgressError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
