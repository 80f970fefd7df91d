//! Closed enumerations with human-readable labels.
//!
//! The catalog, the database columns and the JSON API all speak in labels
//! such as `"On Hiatus"` or `"Slice of Life"`. Internally every value is a
//! closed enum; the label table declared next to each variant is the only
//! place a string is mapped to or from a variant. Unknown labels are
//! rejected with [`LabelError`].

use std::fmt;
use std::str::FromStr;

/// A label that does not belong to the vocabulary of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} label: '{label}'")]
pub struct LabelError {
    pub kind: &'static str,
    pub label: String,
}

/// Declare a labelled enum: the variants, their labels, and the
/// label-based `Display`/`FromStr`/serde implementations.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The human-readable label used at serialization boundaries.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// Look up a variant by its exact label.
            pub fn from_label(label: &str) -> Result<Self, LabelError> {
                match label {
                    $( $label => Ok($name::$variant), )+
                    other => Err(LabelError {
                        kind: $kind,
                        label: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = LabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_label(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_enum! {
    /// Medium of a catalog title.
    MediaType, "media type" {
        Manga => "Manga",
        Manhwa => "Manhwa",
        Manhua => "Manhua",
        OneShot => "One-shot",
        Doujinshi => "Doujinshi",
        LightNovel => "Light Novel",
        Novel => "Novel",
    }
}

labelled_enum! {
    /// Publication status reported by the catalog.
    PublicationStatus, "status" {
        Publishing => "Publishing",
        Finished => "Finished",
        OnHiatus => "On Hiatus",
        Discontinued => "Discontinued",
        Upcoming => "Upcoming",
    }
}

labelled_enum! {
    /// Genre tag. Catalog genres outside this vocabulary are not tracked.
    Genre, "genre" {
        Action => "Action",
        Adventure => "Adventure",
        AvantGarde => "Avant Garde",
        AwardWinning => "Award Winning",
        BoysLove => "Boys Love",
        Comedy => "Comedy",
        Drama => "Drama",
        Fantasy => "Fantasy",
        GirlsLove => "Girls Love",
        Gourmet => "Gourmet",
        Horror => "Horror",
        Mystery => "Mystery",
        Romance => "Romance",
        SciFi => "Sci-Fi",
        SliceOfLife => "Slice of Life",
        Sports => "Sports",
        Supernatural => "Supernatural",
        Suspense => "Suspense",
    }
}

labelled_enum! {
    /// Where the user is with a title.
    #[derive(Default)]
    ProgressState, "progress" {
        #[default]
        Planning => "Planning",
        Reading => "Reading",
        Finished => "Finished",
        Paused => "Paused",
        Dropped => "Dropped",
    }
}

impl PublicationStatus {
    /// Whether the title has stopped publishing for good, which is the only
    /// case in which a reader can have finished it.
    pub fn is_concluded(self) -> bool {
        matches!(
            self,
            PublicationStatus::Finished | PublicationStatus::Discontinued
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
