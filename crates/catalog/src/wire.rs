//! Jikan v4 response shapes and their mapping onto [`CatalogTitle`].
//!
//! Only the fields the library tracks are deserialized; everything else in
//! the payload is ignored.

use std::collections::BTreeSet;

use mangalib_core::catalog::{CatalogError, Pagination, SearchPage};
use mangalib_core::labels::{Genre, MediaType, PublicationStatus};
use mangalib_core::title::{Author, CatalogTitle};
use mangalib_core::types::MalId;
use serde::Deserialize;

/// Envelope of `GET /manga/{id}`.
#[derive(Debug, Deserialize)]
pub struct JikanTitleResponse {
    pub data: JikanManga,
}

/// Envelope of `GET /manga?q=`.
#[derive(Debug, Deserialize)]
pub struct JikanSearchResponse {
    pub data: Vec<JikanManga>,
    pub pagination: JikanPagination,
}

#[derive(Debug, Deserialize)]
pub struct JikanPagination {
    pub current_page: u32,
    pub has_next_page: bool,
}

/// A manga entry as Jikan returns it.
#[derive(Debug, Deserialize)]
pub struct JikanManga {
    pub mal_id: MalId,
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub status: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub authors: Vec<JikanEntity>,
    #[serde(default)]
    pub genres: Vec<JikanEntity>,
}

/// A linked MyAnimeList entity (author, genre, ...).
#[derive(Debug, Deserialize)]
pub struct JikanEntity {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl TryFrom<JikanManga> for CatalogTitle {
    type Error = CatalogError;

    /// Missing counts become `0` and a missing synopsis becomes empty.
    /// Type and status must be present and known. Genres outside the
    /// tracked vocabulary are skipped.
    fn try_from(manga: JikanManga) -> Result<Self, Self::Error> {
        let media_type = manga
            .media_type
            .as_deref()
            .ok_or_else(|| missing_field(manga.mal_id, "type"))
            .and_then(|label| {
                MediaType::from_label(label).map_err(|e| decode_error(manga.mal_id, e))
            })?;

        let status = manga
            .status
            .as_deref()
            .ok_or_else(|| missing_field(manga.mal_id, "status"))
            .and_then(|label| {
                PublicationStatus::from_label(label).map_err(|e| decode_error(manga.mal_id, e))
            })?;

        let genres: BTreeSet<Genre> = manga
            .genres
            .iter()
            .filter_map(|g| match Genre::from_label(&g.name) {
                Ok(genre) => Some(genre),
                Err(_) => {
                    tracing::debug!(mal_id = manga.mal_id, genre = %g.name, "Skipping untracked genre");
                    None
                }
            })
            .collect();

        let authors = manga
            .authors
            .into_iter()
            .map(|a| Author {
                name: a.name,
                url: a.url,
            })
            .collect();

        Ok(CatalogTitle {
            mal_id: manga.mal_id,
            name: manga.title,
            media_type,
            chapters: manga.chapters.unwrap_or(0),
            volumes: manga.volumes.unwrap_or(0),
            status,
            synopsis: manga.synopsis.unwrap_or_default(),
            authors,
            genres,
            url: manga.url,
        })
    }
}

impl TryFrom<JikanSearchResponse> for SearchPage {
    type Error = CatalogError;

    fn try_from(response: JikanSearchResponse) -> Result<Self, Self::Error> {
        let data = response
            .data
            .into_iter()
            .map(CatalogTitle::try_from)
            .collect::<Result<_, _>>()?;

        Ok(SearchPage {
            data,
            pagination: Pagination {
                current_page: response.pagination.current_page,
                has_next: response.pagination.has_next_page,
            },
        })
    }
}

fn missing_field(mal_id: MalId, field: &str) -> CatalogError {
    CatalogError::Decode(format!("manga {mal_id} has no {field}"))
}

fn decode_error(mal_id: MalId, err: impl std::fmt::Display) -> CatalogError {
    CatalogError::Decode(format!("manga {mal_id}: {err}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
