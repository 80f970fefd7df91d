//! Repository for the `titles` table.
//!
//! Titles are keyed by their catalog id, so writes are upserts: saving a
//! title that already exists replaces every column of the stored row.

use mangalib_core::filter::{contains_pattern, TitleFilter};
use mangalib_core::title::{Progress, Title};
use mangalib_core::types::MalId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::title::{genre_labels, TitleRecord, TitleRow};

/// Column list for `titles` queries.
const COLUMNS: &str = "\
    mal_id, name, media_type, chapters, volumes, status, synopsis, \
    authors, genres, url, progress_state, chapters_read, volumes_read, \
    rating, created_at, updated_at";

/// Listing order shared by every multi-row query.
const ORDER_BY: &str = "ORDER BY name, mal_id";

/// Provides CRUD and filtering for stored titles.
pub struct TitleRepo;

impl TitleRepo {
    /// List every stored title.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<TitleRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles {ORDER_BY}");
        let rows = sqlx::query_as::<_, TitleRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_rows(rows)
    }

    /// Find a title by its catalog id.
    pub async fn find_by_id(
        pool: &PgPool,
        mal_id: MalId,
    ) -> Result<Option<TitleRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE mal_id = $1");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(mal_id)
            .fetch_optional(pool)
            .await?
            .map(decode_row)
            .transpose()
    }

    /// Insert a title, or overwrite the catalog columns of the stored row
    /// with the same id.
    ///
    /// Progress columns are only written on insert; an existing row keeps
    /// whatever progress is committed when the upsert runs, so a catalog
    /// write can never roll back a concurrent progress update. Use
    /// [`TitleRepo::update_progress`] to change progress.
    ///
    /// `created_at` is kept on overwrite; `updated_at` is bumped by trigger.
    pub async fn save(pool: &PgPool, title: &Title) -> Result<TitleRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO titles \
                 (mal_id, name, media_type, chapters, volumes, status, synopsis, \
                  authors, genres, url, progress_state, chapters_read, volumes_read, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (mal_id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 media_type = EXCLUDED.media_type, \
                 chapters = EXCLUDED.chapters, \
                 volumes = EXCLUDED.volumes, \
                 status = EXCLUDED.status, \
                 synopsis = EXCLUDED.synopsis, \
                 authors = EXCLUDED.authors, \
                 genres = EXCLUDED.genres, \
                 url = EXCLUDED.url \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TitleRow>(&query)
            .bind(title.mal_id)
            .bind(&title.name)
            .bind(title.media_type.label())
            .bind(title.chapters)
            .bind(title.volumes)
            .bind(title.status.label())
            .bind(&title.synopsis)
            .bind(Json(&title.authors))
            .bind(genre_labels(&title.genres))
            .bind(&title.url)
            .bind(title.progress.state.label())
            .bind(title.progress.chapters_read)
            .bind(title.progress.volumes_read)
            .bind(title.progress.rating)
            .fetch_one(pool)
            .await?;

        tracing::debug!(mal_id = title.mal_id, "Title saved");
        decode_row(row)
    }

    /// Replace the progress columns of a stored title, leaving the catalog
    /// columns untouched.
    ///
    /// Returns `None` if no title with the given id exists.
    pub async fn update_progress(
        pool: &PgPool,
        mal_id: MalId,
        progress: &Progress,
    ) -> Result<Option<TitleRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET \
                 progress_state = $2, chapters_read = $3, volumes_read = $4, rating = $5 \
             WHERE mal_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(mal_id)
            .bind(progress.state.label())
            .bind(progress.chapters_read)
            .bind(progress.volumes_read)
            .bind(progress.rating)
            .fetch_optional(pool)
            .await?
            .map(decode_row)
            .transpose()
    }

    /// Delete a title, returning the row as it was.
    ///
    /// Returns `None` if no title with the given id exists.
    pub async fn delete(pool: &PgPool, mal_id: MalId) -> Result<Option<TitleRecord>, sqlx::Error> {
        let query = format!("DELETE FROM titles WHERE mal_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(mal_id)
            .fetch_optional(pool)
            .await?
            .map(decode_row)
            .transpose()
    }

    /// List the titles matching every constraint in `filter`.
    ///
    /// Blank text fields and empty genre sets are ignored; an unconstrained
    /// filter returns the whole library.
    pub async fn find_by_filter(
        pool: &PgPool,
        filter: &TitleFilter,
    ) -> Result<Vec<TitleRecord>, sqlx::Error> {
        let filter = filter.clone().normalized();
        let (where_clause, bind_values) = build_title_filter(&filter);

        let query = format!("SELECT {COLUMNS} FROM titles {where_clause} {ORDER_BY}");
        let mut q = sqlx::query_as::<_, TitleRow>(&query);
        for val in &bind_values {
            match val {
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            }
        }

        let rows = q.fetch_all(pool).await?;
        decode_rows(rows)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Typed bind value for the dynamically-built filter query.
enum BindValue {
    Text(String),
    TextArray(Vec<String>),
}

/// Build a WHERE clause and bind values from a normalized filter.
///
/// The clause is empty if no constraint is active, or starts with `WHERE `.
fn build_title_filter(filter: &TitleFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();
    let mut push = |condition: &str, value: BindValue| {
        let idx = bind_values.len() + 1;
        conditions.push(condition.replace("$?", &format!("${idx}")));
        bind_values.push(value);
    };

    if let Some(ref name) = filter.name {
        push("name ILIKE $?", BindValue::Text(contains_pattern(name)));
    }

    if let Some(media_type) = filter.media_type {
        push("media_type = $?", BindValue::Text(media_type.label().to_string()));
    }

    if let Some(status) = filter.status {
        push("status = $?", BindValue::Text(status.label().to_string()));
    }

    if let Some(ref author) = filter.author {
        push(
            "EXISTS (SELECT 1 FROM jsonb_array_elements(authors) AS a \
             WHERE a->>'name' ILIKE $?)",
            BindValue::Text(contains_pattern(author)),
        );
    }

    if let Some(ref genres) = filter.genres {
        push("genres @> $?::text[]", BindValue::TextArray(genre_labels(genres)));
    }

    if let Some(progress) = filter.progress {
        push("progress_state = $?", BindValue::Text(progress.label().to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Decode a row, surfacing unknown labels as a column decode error.
fn decode_row(row: TitleRow) -> Result<TitleRecord, sqlx::Error> {
    TitleRecord::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn decode_rows(rows: Vec<TitleRow>) -> Result<Vec<TitleRecord>, sqlx::Error> {
    rows.into_iter().map(decode_row).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
