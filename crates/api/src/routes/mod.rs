pub mod health;
pub mod manga;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /manga                          list, add from search (POST ?mal_id=)
/// /manga/search                   catalog search (?query=&page=)
/// /manga/search/next              next page of the last search
/// /manga/filter                   filter the library (POST)
/// /manga/refresh-all              refresh every stored title (PATCH)
/// /manga/{id}                     get, delete
/// /manga/{id}/refresh             refresh one title (PATCH)
/// /manga/{id}/progress            get, update progress (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/manga", manga::router())
}
