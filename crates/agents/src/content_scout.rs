//! Content scout: turns a keyword list into candidate videos.
//!
//! Search failures are all-or-nothing. If the collaborator faults, the
//! output carries no videos at all, only the error message.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use clients::VideoSearch;
use domain::{KeywordSet, Video};

use crate::traits::{Agent, AgentOutput};

/// Domain context appended to every search query
pub const QUERY_SUFFIX: &str = " sourcing tutorial";

/// `max_results` used when the caller does not set one
pub const DEFAULT_MAX_RESULTS: u32 = 5;

pub const NO_KEYWORDS_ERROR: &str = "No keywords provided.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutRequest {
    pub keywords: Vec<String>,
    pub max_results: u32,
}

impl ScoutRequest {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

impl From<KeywordSet> for ScoutRequest {
    fn from(keywords: KeywordSet) -> Self {
        Self::new(keywords.into_vec())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoutOutput {
    pub videos: Vec<Video>,
    pub error: Option<String>,
}

impl ScoutOutput {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            videos: Vec::new(),
            error: Some(error.into()),
        }
    }
}

impl AgentOutput for ScoutOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Searches for learning videos matching the derived keywords.
pub struct ContentScoutAgent {
    search: Arc<dyn VideoSearch>,
}

impl ContentScoutAgent {
    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self { search }
    }

    /// Joined keywords plus the fixed domain suffix
    pub fn build_query(keywords: &[String]) -> String {
        format!("{}{}", keywords.join(" "), QUERY_SUFFIX)
    }
}

impl fmt::Debug for ContentScoutAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentScoutAgent(name={})", self.name())
    }
}

#[async_trait]
impl Agent for ContentScoutAgent {
    type Input = ScoutRequest;
    type Output = ScoutOutput;

    fn name(&self) -> &str {
        "ContentScout"
    }

    async fn process(&self, input: ScoutRequest) -> ScoutOutput {
        info!(agent = self.name(), keywords = ?input.keywords, "Searching for videos");

        if input.keywords.is_empty() {
            return ScoutOutput::failed(NO_KEYWORDS_ERROR);
        }

        let query = Self::build_query(&input.keywords);
        match self.search.search_videos(&query, input.max_results).await {
            Ok(mut videos) => {
                videos.truncate(input.max_results as usize);
                info!(agent = self.name(), found = videos.len(), "Search complete");
                ScoutOutput {
                    videos,
                    error: None,
                }
            }
            Err(e) => {
                warn!(agent = self.name(), error = %e, "Video search failed");
                ScoutOutput::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::SearchError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every call and returns `count` videos
    #[derive(Default)]
    struct RecordingSearch {
        count: usize,
        calls: AtomicUsize,
        last_query: Mutex<Option<(String, u32)>>,
    }

    #[async_trait]
    impl VideoSearch for RecordingSearch {
        async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some((query.to_string(), max_results));
            Ok((0..self.count)
                .map(|i| Video {
                    id: format!("v{}", i),
                    title: format!("Video {}", i),
                    description: String::new(),
                    thumbnail: String::new(),
                })
                .collect())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl VideoSearch for FailingSearch {
        async fn search_videos(&self, _query: &str, _max: u32) -> Result<Vec<Video>, SearchError> {
            Err(SearchError::Transport("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn test_empty_keywords_skip_search() {
        let search = Arc::new(RecordingSearch::default());
        let agent = ContentScoutAgent::new(search.clone());

        let output = agent.process(ScoutRequest::new(vec![])).await;

        assert!(output.videos.is_empty());
        assert_eq!(output.error.as_deref(), Some(NO_KEYWORDS_ERROR));
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_gets_domain_suffix_and_bound() {
        let search = Arc::new(RecordingSearch {
            count: 2,
            ..Default::default()
        });
        let agent = ContentScoutAgent::new(search.clone());

        let output = agent
            .process(ScoutRequest::new(vec!["recruiter".into(), "sourcing".into()]).with_max_results(10))
            .await;

        assert!(output.is_ok());
        assert_eq!(output.videos.len(), 2);
        let (query, max) = search.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query, "recruiter sourcing sourcing tutorial");
        assert_eq!(max, 10);
    }

    #[tokio::test]
    async fn test_default_max_results_is_five() {
        let search = Arc::new(RecordingSearch::default());
        let agent = ContentScoutAgent::new(search.clone());

        agent.process(ScoutRequest::new(vec!["ats".into()])).await;

        let (_, max) = search.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(max, DEFAULT_MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_oversized_result_is_truncated() {
        let search = Arc::new(RecordingSearch {
            count: 8,
            ..Default::default()
        });
        let agent = ContentScoutAgent::new(search);

        let output = agent.process(ScoutRequest::new(vec!["ats".into()])).await;
        assert_eq!(output.videos.len(), DEFAULT_MAX_RESULTS as usize);
    }

    #[tokio::test]
    async fn test_search_fault_becomes_error_marker() {
        let agent = ContentScoutAgent::new(Arc::new(FailingSearch));

        let output = agent.process(ScoutRequest::new(vec!["sourcing".into()])).await;

        assert!(output.videos.is_empty());
        assert_eq!(
            output.error.as_deref(),
            Some("Video search request failed: connection reset")
        );
    }

    #[test]
    fn test_debug_shows_name() {
        let agent = ContentScoutAgent::new(Arc::new(FailingSearch));
        assert_eq!(format!("{:?}", agent), "ContentScoutAgent(name=ContentScout)");
    }
}
