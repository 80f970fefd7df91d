//! Route definitions for the manga library.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::manga;
use crate::state::AppState;

/// Manga routes mounted at `/manga`.
///
/// ```text
/// GET    /                  -> list
/// POST   /?mal_id=          -> add
/// GET    /search            -> search
/// GET    /search/next       -> search_next
/// POST   /filter            -> filter
/// PATCH  /refresh-all       -> refresh_all
/// GET    /{id}              -> get_by_id
/// DELETE /{id}              -> delete
/// PATCH  /{id}/refresh      -> refresh_one
/// GET    /{id}/progress     -> get_progress
/// PATCH  /{id}/progress     -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manga::list).post(manga::add))
        .route("/search", get(manga::search))
        .route("/search/next", get(manga::search_next))
        .route("/filter", post(manga::filter))
        .route("/refresh-all", patch(manga::refresh_all))
        .route("/{id}", get(manga::get_by_id).delete(manga::delete))
        .route("/{id}/refresh", patch(manga::refresh_one))
        .route(
            "/{id}/progress",
            get(manga::get_progress).patch(manga::update_progress),
        )
}
