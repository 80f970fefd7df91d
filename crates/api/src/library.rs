//! Library operations that combine the search session, the catalog and the
//! title store.
//!
//! Handlers stay thin and delegate here; every write goes through the same
//! [`reconcile`] merge so catalog data is refreshed and progress is kept.

use mangalib_core::catalog::Catalog;
use mangalib_core::error::CoreError;
use mangalib_core::progress::validate_progress;
use mangalib_core::reconcile::reconcile;
use mangalib_core::search_session::SearchSession;
use mangalib_core::title::{CatalogTitle, Progress};
use mangalib_core::types::MalId;
use mangalib_db::models::title::TitleRecord;
use mangalib_db::repositories::TitleRepo;
use mangalib_db::DbPool;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Outcome of a refresh over the whole library.
#[derive(Debug, Default, Serialize)]
pub struct RefreshReport {
    pub refreshed: Vec<MalId>,
    pub failed: Vec<RefreshFailure>,
}

/// A title whose refresh failed, with the reason.
#[derive(Debug, Serialize)]
pub struct RefreshFailure {
    pub mal_id: MalId,
    pub error: String,
}

/// Load a stored title or fail with `NotFound`.
pub async fn get(pool: &DbPool, mal_id: MalId) -> AppResult<TitleRecord> {
    TitleRepo::find_by_id(pool, mal_id)
        .await?
        .ok_or_else(|| not_found(mal_id))
}

/// Persist a title picked from the current search page.
///
/// The snapshot comes from the session only, never from the catalog, so a
/// title can only be added after it was shown on the latest page.
pub async fn add_from_search(
    pool: &DbPool,
    session: &Mutex<SearchSession>,
    mal_id: MalId,
) -> AppResult<TitleRecord> {
    let snapshot = session.lock().await.resolve(mal_id)?.clone();
    let record = merge_and_save(pool, snapshot).await?;

    tracing::info!(mal_id, name = %record.title.name, "Added title from search results");
    Ok(record)
}

/// Re-fetch one stored title from the catalog and merge it in.
pub async fn refresh_one(
    pool: &DbPool,
    catalog: &dyn Catalog,
    mal_id: MalId,
) -> AppResult<TitleRecord> {
    // Existence is checked before the catalog is contacted.
    get(pool, mal_id).await?;

    let snapshot = catalog.fetch(mal_id).await?;
    let record = merge_and_save(pool, snapshot).await?;

    tracing::debug!(mal_id, "Refreshed title from catalog");
    Ok(record)
}

/// Refresh every stored title in turn.
///
/// A failed title is recorded in the report, with the same message an HTTP
/// error response would carry, and the remaining titles are still
/// attempted; earlier successes are never rolled back.
pub async fn refresh_all(pool: &DbPool, catalog: &dyn Catalog) -> AppResult<RefreshReport> {
    let titles = TitleRepo::find_all(pool).await?;
    let mut report = RefreshReport::default();

    for record in titles {
        let mal_id = record.title.mal_id;
        match refresh_one(pool, catalog, mal_id).await {
            Ok(_) => report.refreshed.push(mal_id),
            Err(err) => {
                tracing::warn!(mal_id, error = %err, "Failed to refresh title");
                report.failed.push(RefreshFailure {
                    mal_id,
                    error: err.public_message(),
                });
            }
        }
    }

    tracing::info!(
        refreshed = report.refreshed.len(),
        failed = report.failed.len(),
        "Library refresh finished"
    );
    Ok(report)
}

/// Validate a progress update against the stored title and persist the
/// accepted value. Returns the updated title.
pub async fn update_progress(
    pool: &DbPool,
    mal_id: MalId,
    update: Progress,
) -> AppResult<TitleRecord> {
    let title = get(pool, mal_id).await?.title;

    let accepted = validate_progress(update, &title).map_err(CoreError::from)?;
    TitleRepo::update_progress(pool, mal_id, &accepted)
        .await?
        .ok_or_else(|| not_found(mal_id))
}

/// Delete a stored title, returning it.
pub async fn delete(pool: &DbPool, mal_id: MalId) -> AppResult<TitleRecord> {
    let record = TitleRepo::delete(pool, mal_id)
        .await?
        .ok_or_else(|| not_found(mal_id))?;

    tracing::info!(mal_id, "Deleted title");
    Ok(record)
}

/// Merge a snapshot into the stored title and persist the catalog fields.
///
/// The stored progress is only read to build a new title; the upsert never
/// writes progress over an existing row.
async fn merge_and_save(pool: &DbPool, snapshot: CatalogTitle) -> AppResult<TitleRecord> {
    let existing = TitleRepo::find_by_id(pool, snapshot.mal_id)
        .await?
        .map(|record| record.title);
    let merged = reconcile(existing, snapshot)?;

    Ok(TitleRepo::save(pool, &merged).await?)
}

fn not_found(mal_id: MalId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Manga",
        id: mal_id,
    })
}
