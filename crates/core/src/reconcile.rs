//! Reconciliation of catalog snapshots with stored titles.
//!
//! Catalog-owned fields always take the snapshot's values; the user's
//! [`Progress`] is never taken from the catalog. Adding a title from a
//! search and refreshing a stored title both go through [`reconcile`].

use crate::error::CoreError;
use crate::title::{CatalogTitle, Progress, Title};

/// Merge `snapshot` into the stored title, or build a fresh title when
/// nothing is stored yet.
///
/// A new title starts at `Planning` with zero counts and a zero rating.
/// Fails with [`CoreError::Conflict`] if the snapshot describes a
/// different title than `existing`.
pub fn reconcile(existing: Option<Title>, snapshot: CatalogTitle) -> Result<Title, CoreError> {
    let progress = match existing {
        Some(stored) if stored.mal_id != snapshot.mal_id => {
            return Err(CoreError::Conflict(format!(
                "Cannot update manga {} with catalog data for manga {}",
                stored.mal_id, snapshot.mal_id
            )));
        }
        Some(stored) => stored.progress,
        None => Progress::default(),
    };

    let CatalogTitle {
        mal_id,
        name,
        media_type,
        chapters,
        volumes,
        status,
        synopsis,
        authors,
        genres,
        url,
    } = snapshot;

    Ok(Title {
        mal_id,
        name,
        media_type,
        chapters,
        volumes,
        status,
        synopsis,
        authors,
        genres,
        url,
        progress,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
