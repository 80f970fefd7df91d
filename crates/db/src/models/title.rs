//! Title rows and records.

use mangalib_core::labels::{Genre, LabelError, MediaType, ProgressState, PublicationStatus};
use mangalib_core::title::{Author, Progress, Title};
use mangalib_core::types::{MalId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `titles` table, with enumerations still in label form.
#[derive(Debug, Clone, FromRow)]
pub struct TitleRow {
    pub mal_id: MalId,
    pub name: String,
    pub media_type: String,
    pub chapters: i32,
    pub volumes: i32,
    pub status: String,
    pub synopsis: String,
    pub authors: Json<Vec<Author>>,
    pub genres: Vec<String>,
    pub url: String,
    pub progress_state: String,
    pub chapters_read: i32,
    pub volumes_read: i32,
    pub rating: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A stored title with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleRecord {
    #[serde(flatten)]
    pub title: Title,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TitleRow> for TitleRecord {
    type Error = LabelError;

    fn try_from(row: TitleRow) -> Result<Self, Self::Error> {
        let genres = row
            .genres
            .iter()
            .map(|label| Genre::from_label(label))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            title: Title {
                mal_id: row.mal_id,
                name: row.name,
                media_type: MediaType::from_label(&row.media_type)?,
                chapters: row.chapters,
                volumes: row.volumes,
                status: PublicationStatus::from_label(&row.status)?,
                synopsis: row.synopsis,
                authors: row.authors.0,
                genres,
                url: row.url,
                progress: Progress {
                    state: ProgressState::from_label(&row.progress_state)?,
                    chapters_read: row.chapters_read,
                    volumes_read: row.volumes_read,
                    rating: row.rating,
                },
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Genre labels in the form stored in the `genres` column.
pub fn genre_labels<'a>(genres: impl IntoIterator<Item = &'a Genre>) -> Vec<String> {
    genres.into_iter().map(|g| g.label().to_string()).collect()
}
