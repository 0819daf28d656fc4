//! YouTube Data API v3 `search.list` client.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use domain::Video;

use crate::VideoSearch;
use crate::error::{SearchError, excerpt};

/// Public endpoint of the search.list method
pub const DEFAULT_YOUTUBE_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// search.list refuses `maxResults` above this
const MAX_RESULTS_CAP: u32 = 50;

/// Searches YouTube for videos matching a free-text query.
#[derive(Clone)]
pub struct YouTubeSearchClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl YouTubeSearchClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            endpoint: DEFAULT_YOUTUBE_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different search endpoint (proxies, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError> {
        let max_results = max_results.min(MAX_RESULTS_CAP);
        debug!("Searching YouTube for '{}' (max {})", query, max_results);
        let max_results = max_results.to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("YouTube request failed: {}", e);
                SearchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let listing: SearchListResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.without_url().to_string()))?;

        Ok(listing.into_videos())
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchListResponse {
    /// Keep only video hits, first occurrence of each id wins.
    fn into_videos(self) -> Vec<Video> {
        let mut seen = HashSet::new();
        self.items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                if !seen.insert(id.clone()) {
                    return None;
                }
                let snippet = item.snippet.unwrap_or_default();
                let thumbnail = [
                    snippet.thumbnails.high,
                    snippet.thumbnails.medium,
                    snippet.thumbnails.default,
                ]
                .into_iter()
                .flatten()
                .map(|t| t.url)
                .next()
                .unwrap_or_default();
                Some(Video {
                    id,
                    title: snippet.title,
                    description: snippet.description,
                    thumbnail,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_maps_items_to_videos() {
        let listing: SearchListResponse = serde_json::from_value(json!({
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc"},
                    "snippet": {
                        "title": "Boolean sourcing 101",
                        "description": "Intro",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/abc/default.jpg"},
                            "high": {"url": "https://i.ytimg.com/abc/hq.jpg"}
                        }
                    }
                },
                {"id": {"kind": "youtube#channel", "channelId": "chan"}},
                {"id": {"videoId": "abc"}, "snippet": {"title": "duplicate"}},
                {"id": {"videoId": "def"}, "snippet": {"title": "No thumbs"}}
            ]
        }))
        .unwrap();

        let videos = listing.into_videos();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "abc");
        assert_eq!(videos[0].title, "Boolean sourcing 101");
        assert_eq!(videos[0].thumbnail, "https://i.ytimg.com/abc/hq.jpg");
        assert_eq!(videos[1].id, "def");
        assert_eq!(videos[1].thumbnail, "");
    }

    #[test]
    fn test_listing_without_items_is_empty() {
        let listing: SearchListResponse = serde_json::from_value(json!({"kind": "youtube#searchListResponse"})).unwrap();
        assert!(listing.into_videos().is_empty());
    }
}
