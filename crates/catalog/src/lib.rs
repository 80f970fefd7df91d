//! Jikan (MyAnimeList) catalog client.
//!
//! Implements [`mangalib_core::catalog::Catalog`] over the Jikan v4 REST
//! API using [`reqwest`]. Wire types and their mapping onto catalog titles
//! live in [`wire`].

pub mod client;
pub mod wire;

pub use client::JikanClient;
