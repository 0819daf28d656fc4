//! External collaborators for the learning-path agents.
//!
//! This crate provides the three services the agents call out to:
//! - `VideoSearch`: free-text video search (YouTube Data API v3)
//! - `TextTranslator`: machine translation (Google Cloud Translation v2)
//! - `ProfileAnalyzer`: summary and skill extraction from LinkedIn data
//!
//! Each collaborator is a `Send + Sync` trait so agents can hold them as
//! `Arc<dyn ...>` and tests can swap in in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;

use domain::{ProfileAnalysis, ProfileData, Video};

pub mod error;
pub mod profile;
pub mod translate;
pub mod youtube;

pub use error::{ProfileError, SearchError, TranslationError};
pub use profile::LinkedInProfileAnalyzer;
pub use translate::{DEFAULT_TRANSLATION_ENDPOINT, GoogleTranslateClient};
pub use youtube::{DEFAULT_YOUTUBE_ENDPOINT, YouTubeSearchClient};

/// Searches an external catalogue for videos.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Return at most `max_results` videos for `query`.
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError>;
}

/// Translates text through an external service.
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translate `text` into `target`. `source` is auto-detected when `None`.
    async fn translate_text(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Result<String, TranslationError>;
}

/// Turns raw profile data into a summary and a skill list.
#[async_trait]
pub trait ProfileAnalyzer: Send + Sync {
    async fn analyze_profile(&self, profile: &ProfileData) -> Result<ProfileAnalysis, ProfileError>;
}

/// Shared HTTP client for the reqwest-backed collaborators.
///
/// `timeout` bounds each external call; there is no retry at this layer.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("madrasa/", env!("CARGO_PKG_VERSION")))
        .build()
}
