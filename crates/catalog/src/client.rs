//! REST client for the Jikan v4 manga endpoints.

use std::time::Duration;

use async_trait::async_trait;
use mangalib_core::catalog::{Catalog, CatalogError, SearchPage};
use mangalib_core::title::CatalogTitle;
use mangalib_core::types::MalId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::wire::{JikanSearchResponse, JikanTitleResponse};

/// Default public Jikan endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

const USER_AGENT: &str = concat!("mangalib/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Jikan catalog.
pub struct JikanClient {
    client: reqwest::Client,
    base_url: String,
}

impl JikanClient {
    /// Create a client with its own connection pool and request timeout.
    ///
    /// * `base_url` - API root without a trailing slash, e.g.
    ///   `https://api.jikan.moe/v4`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Catalog for JikanClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let url = format!("{}/manga", self.base_url);
        tracing::debug!(query, page, "Searching catalog");

        let page_param = page.to_string();
        let request = self
            .client
            .get(&url)
            .query(&[("q", query), ("page", page_param.as_str())]);

        let response: JikanSearchResponse =
            self.get_json(request).await?.ok_or_else(|| CatalogError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("search endpoint not found at {url}"),
            })?;

        SearchPage::try_from(response)
    }

    async fn fetch(&self, mal_id: MalId) -> Result<CatalogTitle, CatalogError> {
        let url = format!("{}/manga/{mal_id}", self.base_url);
        tracing::debug!(mal_id, "Fetching catalog record");

        let response: JikanTitleResponse = self
            .get_json(self.client.get(&url))
            .await?
            .ok_or(CatalogError::NotFound(mal_id))?;

        CatalogTitle::try_from(response.data)
    }
}
