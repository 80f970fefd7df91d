//! Domain core for the manga library.
//!
//! Holds the catalog-facing types, the label vocabulary, the search session
//! cache, progress validation and the reconciliation merge. Nothing in here
//! performs I/O; the catalog is reached through the [`catalog::Catalog`]
//! trait and persistence lives in `mangalib-db`.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod labels;
pub mod progress;
pub mod reconcile;
pub mod search_session;
pub mod title;
pub mod types;
