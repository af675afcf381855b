//! Internet Archive search client.
//!
//! This module provides:
//!
//! - `SearchRequest`: one page of an advanced-search query for a single category
//! - `MediaItem` and `SearchResponse`: deserialized search results
//! - `SearchBackend`: the seam the picker fetches through
//! - `ArchiveClient`: the reqwest-backed implementation of `SearchBackend`
//!
//! The advanced-search endpoint is queried with `output=json` and answers with
//! `{"response": {"docs": [...]}}`. Fields such as `description` and `format`
//! come back either as a single string or as a list, so both shapes are accepted.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use url::Url;

use crate::category::Category;
use crate::config::ArchiveConfig;

/// Advanced search endpoint
pub const SEARCH_URL: &str = "https://archive.org/advancedsearch.php";

/// Base address of item detail pages
pub const DETAILS_URL: &str = "https://archive.org/details";

/// Fields requested for every result
pub const RESULT_FIELDS: &str = "identifier,title,mediatype,description,format";

/// Results per page
pub const DEFAULT_ROWS: u32 = 50;

/// Highest page number a request may ask for
pub const DEFAULT_MAX_PAGE: u32 = 100;

/// User agent for API requests
const USER_AGENT: &str = concat!("archive-roulette/", env!("CARGO_PKG_VERSION"));

/// Errors from a single search round trip
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive API returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search task failed: {0}")]
    Task(String),
}

/// One archived item from a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub identifier: String,
    #[serde(default, deserialize_with = "first_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "first_string")]
    pub mediatype: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub description: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub format: Vec<String>,
}

impl MediaItem {
    /// Title if present, otherwise the identifier
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.identifier)
    }

    /// Description paragraphs joined into one block
    pub fn description_text(&self) -> Option<String> {
        if self.description.is_empty() {
            None
        } else {
            Some(self.description.join("\n\n"))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrList>::deserialize(deserializer)?
        .map(StringOrList::into_vec)
        .unwrap_or_default())
}

fn first_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?.into_iter().next())
}

/// Top level advanced-search document
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    response: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<MediaItem>,
}

impl SearchResponse {
    /// Parse a raw JSON body
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Result documents; a missing `response.docs` is an empty page
    pub fn into_docs(self) -> Vec<MediaItem> {
        self.response.map(|r| r.docs).unwrap_or_default()
    }
}

/// A single page query for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    pub category: Category,
    pub page: u32,
    pub rows: u32,
}

impl SearchRequest {
    /// Build the full request URL against `base`
    pub fn url(&self, base: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            base,
            &[
                ("q", self.category.query()),
                ("fl[]", RESULT_FIELDS.to_string()),
                ("rows", self.rows.to_string()),
                ("page", self.page.to_string()),
                ("output", "json".to_string()),
            ],
        )
    }
}

/// Detail page address for an item
pub fn detail_url(base: &str, identifier: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), identifier)
}

/// Something that can answer a search request
pub trait SearchBackend {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<MediaItem>, FetchError>>;
}

impl<T: SearchBackend + ?Sized> SearchBackend for Arc<T> {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<MediaItem>, FetchError>> {
        (**self).search(request)
    }
}

/// Internet Archive API client
#[derive(Clone)]
pub struct ArchiveClient {
    client: reqwest::Client,
    search_url: String,
}

impl ArchiveClient {
    /// Create a client from configuration
    pub fn new(config: &ArchiveConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            search_url: config.search_url.clone(),
        })
    }

    /// Fetch one page of results
    pub async fn fetch_page(&self, request: &SearchRequest) -> Result<Vec<MediaItem>, FetchError> {
        let start = std::time::Instant::now();
        let url = request.url(&self.search_url)?;
        tracing::debug!(
            category = %request.category,
            page = request.page,
            "Searching archive: {}",
            url
        );

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let docs = SearchResponse::from_json(&body)?.into_docs();

        tracing::info!(
            "Fetched {} {} results (page {}) in {:.1}s",
            docs.len(),
            request.category,
            request.page,
            start.elapsed().as_secs_f32()
        );
        Ok(docs)
    }
}

impl SearchBackend for ArchiveClient {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<MediaItem>, FetchError>> {
        Box::pin(self.fetch_page(request))
    }
}
