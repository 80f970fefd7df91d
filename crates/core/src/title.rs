//! Title records: the catalog snapshot and the stored title with the
//! user's progress attached.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::labels::{Genre, MediaType, ProgressState, PublicationStatus};
use crate::types::MalId;

/// A credited author and their catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// A title exactly as the catalog describes it. This is what a search page
/// holds and what a refresh fetches; it carries no user state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTitle {
    pub mal_id: MalId,
    pub name: String,
    pub media_type: MediaType,
    /// Total chapters; `0` while unknown or ongoing.
    pub chapters: i32,
    /// Total volumes; `0` while unknown or ongoing.
    pub volumes: i32,
    pub status: PublicationStatus,
    pub synopsis: String,
    pub authors: Vec<Author>,
    pub genres: BTreeSet<Genre>,
    pub url: String,
}

/// The user's reading state for one title.
///
/// Bounds are only checked when an update is submitted (see
/// [`crate::progress::validate_progress`]); a stored value may fall out of
/// range after a catalog refresh shrinks the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub state: ProgressState,
    pub chapters_read: i32,
    pub volumes_read: i32,
    pub rating: i32,
}

/// A stored title: catalog fields plus the user-owned [`Progress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub mal_id: MalId,
    pub name: String,
    pub media_type: MediaType,
    pub chapters: i32,
    pub volumes: i32,
    pub status: PublicationStatus,
    pub synopsis: String,
    pub authors: Vec<Author>,
    pub genres: BTreeSet<Genre>,
    pub url: String,
    pub progress: Progress,
}

impl Title {
    /// The catalog-owned part of this title.
    pub fn catalog_fields(&self) -> CatalogTitle {
        CatalogTitle {
            mal_id: self.mal_id,
            name: self.name.clone(),
            media_type: self.media_type,
            chapters: self.chapters,
            volumes: self.volumes,
            status: self.status,
            synopsis: self.synopsis.clone(),
            authors: self.authors.clone(),
            genres: self.genres.clone(),
            url: self.url.clone(),
        }
    }
}
