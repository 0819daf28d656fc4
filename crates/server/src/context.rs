//! Application-lifetime context.
//!
//! Built once at startup from `Settings` and shared (by clone) with every
//! request handler. Holds the single orchestrator and the translation agent.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use agents::TranslationAgent;
use clients::{GoogleTranslateClient, LinkedInProfileAnalyzer, YouTubeSearchClient, http_client};

use crate::config::Settings;
use crate::orchestrator::LearningPathOrchestrator;

#[derive(Clone)]
pub struct AppContext {
    pub orchestrator: LearningPathOrchestrator,
    pub translator: Arc<TranslationAgent>,
}

impl AppContext {
    pub fn new(orchestrator: LearningPathOrchestrator, translator: Arc<TranslationAgent>) -> Self {
        Self {
            orchestrator,
            translator,
        }
    }

    /// Wire the production collaborators from configuration.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = http_client(settings.http_timeout()).context("Failed to build HTTP client")?;

        let search = YouTubeSearchClient::new(http.clone(), settings.youtube_api_key.clone())
            .with_endpoint(settings.youtube_api_url.clone());
        let translate = GoogleTranslateClient::new(http, settings.translation_api_key.clone())
            .with_endpoint(settings.translation_api_url.clone());

        info!(
            youtube = %settings.youtube_api_url,
            translation = %settings.translation_api_url,
            timeout_secs = settings.http_timeout_secs,
            "Configured external collaborators"
        );

        let orchestrator = LearningPathOrchestrator::from_collaborators(
            Arc::new(search),
            Arc::new(LinkedInProfileAnalyzer::new()),
        );
        let translator = Arc::new(TranslationAgent::new(Arc::new(translate)));

        Ok(Self::new(orchestrator, translator))
    }
}
