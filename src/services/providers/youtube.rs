//! YouTube Data API v3 provider
//!
//! Uses the `search.list` endpoint restricted to videos. Only the video id and the
//! snippet title are kept; results without a video id (channels, playlists that slip
//! through) are dropped.

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::Candidate,
    services::providers::SearchProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

impl SearchItem {
    fn into_candidate(self) -> Option<Candidate> {
        let id = self.id.video_id.filter(|id| !id.is_empty())?;
        Some(Candidate::new(id, self.snippet.title))
    }
}

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl YouTubeProvider {
    /// Creates a provider; search results are cached for `cache_ttl` seconds when a cache
    /// is supplied
    pub fn new(cache: Option<Cache>, api_key: String, api_url: String, cache_ttl: u64) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
            cache_ttl,
        }
    }

    async fn fetch(&self, query: &str, max_results: u32) -> AppResult<Vec<Candidate>> {
        let url = format!("{}/search", self.api_url);
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "YouTube API returned status {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        let candidates: Vec<Candidate> = search
            .items
            .into_iter()
            .filter_map(SearchItem::into_candidate)
            .collect();

        tracing::info!(
            query = %query,
            results = candidates.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(candidates)
    }
}

#[async_trait::async_trait]
impl SearchProvider for YouTubeProvider {
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<Candidate>> {
        if query.trim().is_empty() {
            return Err(AppError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        match &self.cache {
            Some(cache) => {
                let key = CacheKey::VideoSearch {
                    query: query.to_string(),
                    max_results,
                };
                cached!(cache, key, self.cache_ttl, self.fetch(query, max_results))
            }
            None => self.fetch(query, max_results).await,
        }
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
