//! Handlers for the `/manga` resource.
//!
//! Covers catalog search with its single-page session, adding titles from
//! the current page, refreshing stored titles, reading progress, and
//! filtering the library.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mangalib_core::catalog::SearchPage;
use mangalib_core::error::CoreError;
use mangalib_core::filter::TitleFilter;
use mangalib_core::title::Progress;
use mangalib_core::types::MalId;
use mangalib_db::models::title::TitleRecord;
use mangalib_db::repositories::TitleRepo;

use crate::error::{AppError, AppResult};
use crate::library::{self, RefreshReport};
use crate::query::{AddParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/manga
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TitleRecord>>>> {
    let titles = TitleRepo::find_all(&state.pool).await?;
    Ok(Json(DataResponse { data: titles }))
}

/// GET /api/v1/manga/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<MalId>,
) -> AppResult<Json<DataResponse<TitleRecord>>> {
    let record = library::get(&state.pool, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/manga/{id}
///
/// Returns the deleted title.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<MalId>,
) -> AppResult<Json<DataResponse<TitleRecord>>> {
    let record = library::delete(&state.pool, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/manga?mal_id=
///
/// Persist a title from the current search page. An already stored title
/// gets its catalog fields replaced and keeps its progress.
pub async fn add(
    State(state): State<AppState>,
    Query(params): Query<AddParams>,
) -> AppResult<(StatusCode, Json<DataResponse<TitleRecord>>)> {
    let record =
        library::add_from_search(&state.pool, &state.search_session, params.mal_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/manga/search?query=&page=
///
/// Search the catalog and replace the search session with the result.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchPage>> {
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::Core(CoreError::Validation(
            "page must be at least 1".to_string(),
        )));
    }

    let mut session = state.search_session.lock().await;
    let result = session
        .search(state.catalog.as_ref(), &params.query, page)
        .await?;

    tracing::debug!(
        query = %params.query,
        page,
        results = result.data.len(),
        "Catalog search"
    );
    Ok(Json(result))
}

/// GET /api/v1/manga/search/next
pub async fn search_next(State(state): State<AppState>) -> AppResult<Json<SearchPage>> {
    let mut session = state.search_session.lock().await;
    let result = session.search_next(state.catalog.as_ref()).await?;
    Ok(Json(result))
}

/// PATCH /api/v1/manga/refresh-all
///
/// Refresh every stored title; failures are reported, not fatal.
pub async fn refresh_all(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RefreshReport>>> {
    let report = library::refresh_all(&state.pool, state.catalog.as_ref()).await?;
    Ok(Json(DataResponse { data: report }))
}

/// PATCH /api/v1/manga/{id}/refresh
pub async fn refresh_one(
    State(state): State<AppState>,
    Path(id): Path<MalId>,
) -> AppResult<Json<DataResponse<TitleRecord>>> {
    let record = library::refresh_one(&state.pool, state.catalog.as_ref(), id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/manga/{id}/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<MalId>,
) -> AppResult<Json<DataResponse<Progress>>> {
    let record = library::get(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: record.title.progress,
    }))
}

/// PATCH /api/v1/manga/{id}/progress
///
/// Returns the updated title. Its progress may differ from the request when
/// the state is `Finished` (counts are pinned to the title's totals).
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<MalId>,
    Json(update): Json<Progress>,
) -> AppResult<Json<DataResponse<TitleRecord>>> {
    let record = library::update_progress(&state.pool, id, update).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/manga/filter
///
/// A missing or `null` body matches every stored title.
pub async fn filter(
    State(state): State<AppState>,
    body: Option<Json<Option<TitleFilter>>>,
) -> AppResult<Json<DataResponse<Vec<TitleRecord>>>> {
    let criteria = body.and_then(|Json(f)| f).unwrap_or_default();
    let titles = TitleRepo::find_by_filter(&state.pool, &criteria).await?;
    Ok(Json(DataResponse { data: titles }))
}
