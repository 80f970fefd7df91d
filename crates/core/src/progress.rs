//! Progress update validation.
//!
//! A submitted [`Progress`] is checked against the stored [`Title`] it
//! targets. The check is pure: it either returns the progress that should
//! be stored (possibly normalized) or the first rule it violates.

use crate::labels::{ProgressState, PublicationStatus};
use crate::title::{Progress, Title};

/// Why a progress update was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// Marking a title finished while it is still being published.
    #[error("Cannot set progress to 'Finished' as the status of '{title}' is '{status}'")]
    InvalidTransition {
        title: String,
        status: PublicationStatus,
    },

    #[error("Cannot set {field} to a negative number.")]
    NegativeValue { field: &'static str },

    /// A count beyond what the title has published.
    #[error("Cannot set {field} to {value} as '{title}' only has {total} {unit}(s).")]
    OutOfRange {
        field: &'static str,
        value: i32,
        title: String,
        total: i32,
        unit: &'static str,
    },
}

/// Validate `update` against `title`.
///
/// Rules, in order, first violation wins:
///
/// 1. `Finished` requires the title to be finished or discontinued.
/// 2. An accepted `Finished` pins both counts to the title's totals; the
///    rating is kept as submitted.
/// 3. Otherwise chapters are checked before volumes: a negative count is
///    rejected, and a count above a known (non-zero) total is rejected.
pub fn validate_progress(update: Progress, title: &Title) -> Result<Progress, ProgressError> {
    if update.state == ProgressState::Finished {
        if !title.status.is_concluded() {
            return Err(ProgressError::InvalidTransition {
                title: title.name.clone(),
                status: title.status,
            });
        }

        return Ok(Progress {
            state: ProgressState::Finished,
            chapters_read: title.chapters,
            volumes_read: title.volumes,
            rating: update.rating,
        });
    }

    check_count("chaptersRead", "chapter", update.chapters_read, title.chapters, title)?;
    check_count("volumesRead", "volume", update.volumes_read, title.volumes, title)?;

    Ok(update)
}

/// A total of `0` means the catalog does not know it yet, so only the
/// lower bound applies.
fn check_count(
    field: &'static str,
    unit: &'static str,
    value: i32,
    total: i32,
    title: &Title,
) -> Result<(), ProgressError> {
    if value < 0 {
        return Err(ProgressError::NegativeValue { field });
    }

    if total > 0 && value > total {
        return Err(ProgressError::OutOfRange {
            field,
            value,
            title: title.name.clone(),
            total,
            unit,
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
