#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mangalib_api::config::ServerConfig;
use mangalib_api::router::build_app_router;
use mangalib_api::state::AppState;
use mangalib_core::catalog::{Catalog, CatalogError, Pagination, SearchPage};
use mangalib_core::labels::{Genre, MediaType, PublicationStatus};
use mangalib_core::title::{Author, CatalogTitle};
use mangalib_core::types::MalId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog_base_url: "http://catalog.invalid".to_string(),
        catalog_timeout_secs: 5,
    }
}

/// Build the full application router over `pool` with `catalog` standing in
/// for Jikan.
///
/// The returned router owns one search session; clone it to send several
/// requests against the same session.
pub fn build_test_app(pool: PgPool, catalog: Arc<FakeCatalog>) -> Router {
    let state = AppState::new(pool, test_config(), catalog);
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Fake catalog
// ---------------------------------------------------------------------------

/// In-memory catalog. Search pages are keyed by `(query, page)`; fetches are
/// served from a record table that tests may edit between requests.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<HashMap<(String, u32), SearchPage>>,
    records: Mutex<HashMap<MalId, CatalogTitle>>,
    broken: Mutex<HashSet<MalId>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a search page. Every title on it also becomes fetchable.
    pub fn add_page(&self, query: &str, page: u32, has_next: bool, data: Vec<CatalogTitle>) {
        for title in &data {
            self.put_record(title.clone());
        }
        self.pages.lock().unwrap().insert(
            (query.to_string(), page),
            SearchPage {
                data,
                pagination: Pagination {
                    current_page: page,
                    has_next,
                },
            },
        );
    }

    /// Set the record returned by `fetch` for this title's id.
    pub fn put_record(&self, title: CatalogTitle) {
        self.records.lock().unwrap().insert(title.mal_id, title);
    }

    /// Make every `fetch` of this id fail with an upstream error.
    pub fn break_fetch(&self, mal_id: MalId) {
        self.broken.lock().unwrap().insert(mal_id);
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or(SearchPage {
                data: Vec::new(),
                pagination: Pagination {
                    current_page: page,
                    has_next: false,
                },
            }))
    }

    async fn fetch(&self, mal_id: MalId) -> Result<CatalogTitle, CatalogError> {
        if self.broken.lock().unwrap().contains(&mal_id) {
            return Err(CatalogError::Api {
                status: 503,
                body: "upstream unavailable".to_string(),
            });
        }
        self.records
            .lock()
            .unwrap()
            .get(&mal_id)
            .cloned()
            .ok_or(CatalogError::NotFound(mal_id))
    }
}

/// A catalog title with a single author and genre.
pub fn catalog_title(
    mal_id: MalId,
    name: &str,
    chapters: i32,
    volumes: i32,
    status: PublicationStatus,
) -> CatalogTitle {
    CatalogTitle {
        mal_id,
        name: name.to_string(),
        media_type: MediaType::Manga,
        chapters,
        volumes,
        status,
        synopsis: format!("Synopsis of {name}"),
        authors: vec![Author {
            name: "Miura, Kentarou".to_string(),
            url: "https://myanimelist.net/people/1868".to_string(),
        }],
        genres: BTreeSet::from([Genre::Action]),
        url: format!("https://myanimelist.net/manga/{mal_id}"),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
