//! Criteria for filtering the stored library.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::labels::{Genre, MediaType, ProgressState, PublicationStatus};

/// Every field is optional; an absent or blank field places no constraint,
/// and a filter with no constraints matches the whole library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleFilter {
    /// Case-insensitive substring of the title name.
    pub name: Option<String>,
    pub media_type: Option<MediaType>,
    pub status: Option<PublicationStatus>,
    /// Case-insensitive substring of any author's name.
    pub author: Option<String>,
    /// The title must carry all of these genres.
    pub genres: Option<BTreeSet<Genre>>,
    pub progress: Option<ProgressState>,
}

impl TitleFilter {
    /// Drop blank text criteria and empty genre sets so that downstream
    /// code only sees real constraints.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|s| !s.trim().is_empty()),
            author: self.author.filter(|s| !s.trim().is_empty()),
            genres: self.genres.filter(|g| !g.is_empty()),
            ..self
        }
    }

    /// Whether the filter places no constraint at all (after normalization).
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Build a `LIKE`/`ILIKE` pattern matching `term` anywhere in a value.
///
/// `%`, `_` and the escape character itself are escaped with `\`, so user
/// input is always matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_dropped() {
        let filter = TitleFilter {
            name: Some("   ".to_string()),
            author: Some(String::new()),
            genres: Some(BTreeSet::new()),
            ..Default::default()
        }
        .normalized();

        assert!(filter.is_unconstrained());
    }

    #[test]
    fn real_criteria_survive_normalization() {
        let filter = TitleFilter {
            name: Some("berserk".to_string()),
            status: Some(PublicationStatus::OnHiatus),
            genres: Some(BTreeSet::from([Genre::Action])),
            ..Default::default()
        }
        .normalized();

        assert_eq!(filter.name.as_deref(), Some("berserk"));
        assert_eq!(filter.status, Some(PublicationStatus::OnHiatus));
        assert!(!filter.is_unconstrained());
    }

    #[test]
    fn missing_json_fields_default_to_none() {
        let filter: TitleFilter =
            serde_json::from_str(r#"{"progress": "Reading", "genres": ["Drama", "Sci-Fi"]}"#)
                .unwrap();

        assert_eq!(filter.progress, Some(ProgressState::Reading));
        assert_eq!(
            filter.genres,
            Some(BTreeSet::from([Genre::Drama, Genre::SciFi]))
        );
        assert_eq!(filter.name, None);
        assert_eq!(filter.media_type, None);
    }

    #[test]
    fn unknown_label_in_filter_is_rejected() {
        let err = serde_json::from_str::<TitleFilter>(r#"{"media_type": "Webtoon"}"#).unwrap_err();
        assert!(err.to_string().contains("Unknown media type label: 'Webtoon'"));
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("one"), "%one%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }
}
