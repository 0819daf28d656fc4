//! # Learning Path Orchestrator
//!
//! This module coordinates the learning-path pipeline:
//! 1. Analyze the LinkedIn profile (only when one was supplied)
//! 2. Derive search keywords from goals, profile skills and persona
//! 3. Scout candidate videos
//! 4. Design the curriculum
//!
//! ## Failure policy
//! Stages 1 and 3 are soft: an error marker is logged and the pipeline
//! continues with default data (sentinel summary, no skills, no videos).
//! Stage 4 is the only hard failure, because its output is the whole
//! product. Its error aborts the run and is returned to the caller verbatim.
//!
//! Stages run strictly in order; each consumes the previous stage's output.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info, warn};

use agents::{
    Agent, AgentOutput, ContentScoutAgent, CurriculumDesignerAgent, DesignOutput, DesignRequest,
    NO_PROFILE_SUMMARY, ProfileAnalyzerAgent, ProfileOutput, ScoutOutput, ScoutRequest,
};
use clients::{ProfileAnalyzer, VideoSearch};
use domain::{KeywordSet, LearningPath, PathRequest, ProfileData, Video};

/// Context terms added to every keyword set
pub const DOMAIN_TERMS: [&str; 2] = ["sourcing", "recruitment"];

/// Candidates requested from the scout; more than the curriculum keeps
pub const SCOUT_MAX_RESULTS: u32 = 10;

pub type DynAgent<I, O> = Arc<dyn Agent<Input = I, Output = O>>;

/// The one failure that aborts a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationError {
    #[error("{0}")]
    CurriculumDesign(String),
}

/// Either the finished path or the reason the run aborted
pub type PathOutcome = Result<LearningPath, OrchestrationError>;

// =============================================================================
// Stage reporting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProfileAnalysis,
    KeywordDerivation,
    ContentScouting,
    CurriculumDesign,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ProfileAnalysis => "profile_analysis",
            Stage::KeywordDerivation => "keyword_derivation",
            Stage::ContentScouting => "content_scouting",
            Stage::CurriculumDesign => "curriculum_design",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Ok,
    /// Finished with an error marker or empty data; the run continues
    Degraded,
    /// Aborted the run
    Failed,
    Skipped,
}

impl StageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageOutcome::Ok => "ok",
            StageOutcome::Degraded => "degraded",
            StageOutcome::Failed => "failed",
            StageOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub elapsed: Duration,
    pub outcome: StageOutcome,
    pub detail: Option<String>,
}

/// Result of one run plus what happened at each stage
#[derive(Debug, Clone)]
pub struct PathRun {
    pub outcome: PathOutcome,
    pub stages: Vec<StageReport>,
}

impl PathRun {
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }
}

/// Collects stage reports and emits one structured event per stage.
#[derive(Default)]
struct StageLog {
    reports: Vec<StageReport>,
}

impl StageLog {
    fn record(&mut self, stage: Stage, started: Instant, outcome: StageOutcome, detail: Option<String>) {
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let detail_text = detail.as_deref().unwrap_or("");
        match outcome {
            StageOutcome::Ok | StageOutcome::Skipped => info!(
                stage = stage.as_str(),
                outcome = outcome.as_str(),
                elapsed_ms,
                detail = detail_text,
                "Stage finished"
            ),
            StageOutcome::Degraded => warn!(
                stage = stage.as_str(),
                outcome = outcome.as_str(),
                elapsed_ms,
                detail = detail_text,
                "Stage degraded"
            ),
            StageOutcome::Failed => error!(
                stage = stage.as_str(),
                outcome = outcome.as_str(),
                elapsed_ms,
                detail = detail_text,
                "Stage failed"
            ),
        }
        self.reports.push(StageReport {
            stage,
            elapsed,
            outcome,
            detail,
        });
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Owns one instance of each agent and drives them per request.
///
/// Agents are stateless, so a single orchestrator (cheap to clone) serves
/// every concurrent request without locking.
#[derive(Clone)]
pub struct LearningPathOrchestrator {
    profile_analyzer: DynAgent<ProfileData, ProfileOutput>,
    content_scout: DynAgent<ScoutRequest, ScoutOutput>,
    curriculum_designer: DynAgent<DesignRequest, DesignOutput>,
}

impl LearningPathOrchestrator {
    pub fn new(
        profile_analyzer: DynAgent<ProfileData, ProfileOutput>,
        content_scout: DynAgent<ScoutRequest, ScoutOutput>,
        curriculum_designer: DynAgent<DesignRequest, DesignOutput>,
    ) -> Self {
        Self {
            profile_analyzer,
            content_scout,
            curriculum_designer,
        }
    }

    /// Standard agent set over the given collaborators
    pub fn from_collaborators(
        search: Arc<dyn VideoSearch>,
        profile_analyzer: Arc<dyn ProfileAnalyzer>,
    ) -> Self {
        Self::new(
            Arc::new(ProfileAnalyzerAgent::new(profile_analyzer)),
            Arc::new(ContentScoutAgent::new(search)),
            Arc::new(CurriculumDesignerAgent::new()),
        )
    }

    /// Main entry point: build a learning path for one onboarding request.
    pub async fn generate_learning_path(
        &self,
        request: &PathRequest,
    ) -> PathOutcome {
        self.generate_learning_path_with_report(request).await.outcome
    }

    /// Same as [`generate_learning_path`](Self::generate_learning_path), keeping per-stage reports.
    pub async fn generate_learning_path_with_report(&self, request: &PathRequest) -> PathRun {
        let start_time = Instant::now();
        let mut log = StageLog::default();
        info!(
            user = request.telegram_user_id,
            persona = %request.persona,
            goals = ?request.goals,
            "Starting learning path generation"
        );

        let (profile_summary, skills) = self
            .analyze_profile(request.linkedin_data.as_ref(), &mut log)
            .await;

        let keywords = Self::derive_keywords(request, &skills, &mut log);

        let videos = self.scout_content(keywords, &mut log).await;

        let outcome = self
            .design_curriculum(request, profile_summary, videos, &mut log)
            .await;

        info!(
            user = request.telegram_user_id,
            success = outcome.is_ok(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "Learning path generation finished"
        );

        PathRun {
            outcome,
            stages: log.reports,
        }
    }

    /// Stage 1. Errors are ignored beyond logging; defaults fill in.
    async fn analyze_profile(
        &self,
        linkedin_data: Option<&ProfileData>,
        log: &mut StageLog,
    ) -> (String, Vec<String>) {
        let started = Instant::now();
        let Some(data) = linkedin_data else {
            log.record(Stage::ProfileAnalysis, started, StageOutcome::Skipped, None);
            return (NO_PROFILE_SUMMARY.to_string(), Vec::new());
        };

        let result = self.profile_analyzer.process(data.clone()).await;
        match result.error() {
            Some(err) => log.record(
                Stage::ProfileAnalysis,
                started,
                StageOutcome::Degraded,
                Some(err.to_string()),
            ),
            None => log.record(
                Stage::ProfileAnalysis,
                started,
                StageOutcome::Ok,
                Some(format!("{} skills", result.skills.len())),
            ),
        }
        (result.summary, result.skills)
    }

    /// Stage 2
    fn derive_keywords(request: &PathRequest, skills: &[String], log: &mut StageLog) -> KeywordSet {
        let started = Instant::now();
        let keywords = KeywordSet::derive(&request.goals, skills, &request.persona, &DOMAIN_TERMS);
        log.record(
            Stage::KeywordDerivation,
            started,
            StageOutcome::Ok,
            Some(keywords.to_query()),
        );
        keywords
    }

    /// Stage 3. An error or an empty result degrades but never aborts.
    async fn scout_content(&self, keywords: KeywordSet, log: &mut StageLog) -> Vec<Video> {
        let started = Instant::now();
        let request = ScoutRequest::from(keywords).with_max_results(SCOUT_MAX_RESULTS);
        let result = self.content_scout.process(request).await;

        if let Some(err) = result.error() {
            log.record(
                Stage::ContentScouting,
                started,
                StageOutcome::Degraded,
                Some(format!("Content scouting failed: {}", err)),
            );
        } else if result.videos.is_empty() {
            log.record(
                Stage::ContentScouting,
                started,
                StageOutcome::Degraded,
                Some("No videos found".to_string()),
            );
        } else {
            log.record(
                Stage::ContentScouting,
                started,
                StageOutcome::Ok,
                Some(format!("{} videos", result.videos.len())),
            );
        }
        result.videos
    }

    /// Stage 4, the hard-failure point.
    async fn design_curriculum(
        &self,
        request: &PathRequest,
        profile_summary: String,
        videos: Vec<Video>,
        log: &mut StageLog,
    ) -> Result<LearningPath, OrchestrationError> {
        let started = Instant::now();
        let result = self
            .curriculum_designer
            .process(DesignRequest {
                profile_summary,
                goals: request.goals.clone(),
                persona: request.persona.clone(),
                videos,
            })
            .await;

        if let Some(err) = result.error() {
            log.record(
                Stage::CurriculumDesign,
                started,
                StageOutcome::Failed,
                Some(err.to_string()),
            );
            return Err(OrchestrationError::CurriculumDesign(err.to_string()));
        }

        log.record(
            Stage::CurriculumDesign,
            started,
            StageOutcome::Ok,
            Some(format!("{} steps", result.learning_path.len())),
        );
        Ok(result.learning_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clients::{LinkedInProfileAnalyzer, SearchError};
    use serde_json::json;
    use std::sync::Mutex;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn videos(n: usize) -> Vec<Video> {
        (0..n)
            .map(|i| Video {
                id: format!("vid-{}", i),
                title: format!("Sourcing lesson {}", i),
                description: String::new(),
                thumbnail: String::new(),
            })
            .collect()
    }

    fn sourcing_request() -> PathRequest {
        PathRequest::new(1001, "recruiter", vec!["sourcing".into()]).unwrap()
    }

    /// Search collaborator with a canned outcome that remembers its last query
    struct StubSearch {
        outcome: Result<Vec<Video>, String>,
        last_query: Mutex<Option<(String, u32)>>,
    }

    impl StubSearch {
        fn returning(videos: Vec<Video>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Ok(videos),
                last_query: Mutex::new(None),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(message.to_string()),
                last_query: Mutex::new(None),
            })
        }

        fn last_query(&self) -> Option<(String, u32)> {
            self.last_query.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoSearch for StubSearch {
        async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError> {
            *self.last_query.lock().unwrap() = Some((query.to_string(), max_results));
            self.outcome.clone().map_err(SearchError::Transport)
        }
    }

    /// Designer that always reports an error, and records what it received
    #[derive(Default)]
    struct BrokenDesigner {
        received: Mutex<Option<DesignRequest>>,
    }

    #[async_trait]
    impl Agent for BrokenDesigner {
        type Input = DesignRequest;
        type Output = DesignOutput;

        fn name(&self) -> &str {
            "BrokenDesigner"
        }

        async fn process(&self, input: DesignRequest) -> DesignOutput {
            *self.received.lock().unwrap() = Some(input);
            DesignOutput {
                learning_path: Vec::new(),
                error: Some("ranking model unavailable".into()),
            }
        }
    }

    fn orchestrator_with(search: Arc<StubSearch>) -> LearningPathOrchestrator {
        LearningPathOrchestrator::from_collaborators(search, Arc::new(LinkedInProfileAnalyzer::new()))
    }

    // ============================================================================
    // Happy path
    // ============================================================================

    #[tokio::test]
    async fn test_five_videos_give_three_steps_in_order() {
        let search = StubSearch::returning(videos(5));
        let orchestrator = orchestrator_with(search.clone());

        let path = orchestrator
            .generate_learning_path(&sourcing_request())
            .await
            .expect("pipeline should succeed");

        assert_eq!(path.len(), 3);
        for (i, step) in path.iter().enumerate() {
            assert_eq!(step.module, 1);
            assert_eq!(step.step, i as u32 + 1);
            assert_eq!(step.video_id, format!("vid-{}", i));
        }
    }

    #[tokio::test]
    async fn test_scout_receives_deduplicated_keywords_and_ten_results() {
        let search = StubSearch::returning(videos(1));
        let orchestrator = orchestrator_with(search.clone());

        orchestrator.generate_learning_path(&sourcing_request()).await.unwrap();

        // "sourcing" appears as goal and domain term but only once in the query
        let (query, max) = search.last_query().unwrap();
        assert_eq!(query, "recruiter recruitment sourcing sourcing tutorial");
        assert_eq!(max, SCOUT_MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_profile_skills_join_keywords() {
        let search = StubSearch::returning(videos(2));
        let orchestrator = orchestrator_with(search.clone());
        let request = sourcing_request().with_linkedin_data(
            json!({"summary": "Agency recruiter", "skills": ["Boolean"]})
                .as_object()
                .cloned()
                .unwrap(),
        );

        let run = orchestrator.generate_learning_path_with_report(&request).await;

        assert!(run.outcome.is_ok());
        assert_eq!(run.stage(Stage::ProfileAnalysis).unwrap().outcome, StageOutcome::Ok);
        let (query, _) = search.last_query().unwrap();
        assert!(query.starts_with("Boolean "));
    }

    // ============================================================================
    // Soft failures
    // ============================================================================

    #[tokio::test]
    async fn test_no_videos_returns_empty_path_not_error() {
        let orchestrator = orchestrator_with(StubSearch::returning(vec![]));

        let run = orchestrator.generate_learning_path_with_report(&sourcing_request()).await;

        assert_eq!(run.outcome, Ok(vec![]));
        let scouting = run.stage(Stage::ContentScouting).unwrap();
        assert_eq!(scouting.outcome, StageOutcome::Degraded);
        assert_eq!(scouting.detail.as_deref(), Some("No videos found"));
    }

    #[tokio::test]
    async fn test_search_failure_continues_to_design() {
        let orchestrator = orchestrator_with(StubSearch::failing("quota exceeded"));

        let run = orchestrator.generate_learning_path_with_report(&sourcing_request()).await;

        assert_eq!(run.outcome, Ok(vec![]));
        assert_eq!(
            run.stage(Stage::ContentScouting).unwrap().outcome,
            StageOutcome::Degraded
        );
        assert_eq!(run.stage(Stage::CurriculumDesign).unwrap().outcome, StageOutcome::Ok);
    }

    #[tokio::test]
    async fn test_broken_profile_falls_back_to_sentinel() {
        let search = StubSearch::returning(videos(4));
        let designer = Arc::new(BrokenDesigner::default());
        let orchestrator = LearningPathOrchestrator::new(
            Arc::new(ProfileAnalyzerAgent::new(Arc::new(LinkedInProfileAnalyzer::new()))),
            Arc::new(ContentScoutAgent::new(search)),
            designer.clone(),
        );
        let request = sourcing_request()
            .with_linkedin_data(json!({"skills": "not-a-list"}).as_object().cloned().unwrap());

        let run = orchestrator.generate_learning_path_with_report(&request).await;

        assert_eq!(
            run.stage(Stage::ProfileAnalysis).unwrap().outcome,
            StageOutcome::Degraded
        );
        let received = designer.received.lock().unwrap().clone().unwrap();
        assert_eq!(received.profile_summary, NO_PROFILE_SUMMARY);
        assert_eq!(received.videos.len(), 4);
    }

    #[tokio::test]
    async fn test_profile_stage_skipped_without_linkedin_data() {
        let orchestrator = orchestrator_with(StubSearch::returning(videos(1)));

        let run = orchestrator.generate_learning_path_with_report(&sourcing_request()).await;

        assert_eq!(
            run.stage(Stage::ProfileAnalysis).unwrap().outcome,
            StageOutcome::Skipped
        );
        let order: Vec<_> = run.stages.iter().map(|r| r.stage).collect();
        assert_eq!(
            order,
            vec![
                Stage::ProfileAnalysis,
                Stage::KeywordDerivation,
                Stage::ContentScouting,
                Stage::CurriculumDesign
            ]
        );
    }

    // ============================================================================
    // Hard failure
    // ============================================================================

    #[tokio::test]
    async fn test_designer_error_is_terminal_and_verbatim() {
        let search = StubSearch::returning(videos(5));
        let orchestrator = LearningPathOrchestrator::new(
            Arc::new(ProfileAnalyzerAgent::new(Arc::new(LinkedInProfileAnalyzer::new()))),
            Arc::new(ContentScoutAgent::new(search)),
            Arc::new(BrokenDesigner::default()),
        );

        let run = orchestrator.generate_learning_path_with_report(&sourcing_request()).await;

        assert_eq!(
            run.outcome,
            Err(OrchestrationError::CurriculumDesign("ranking model unavailable".into()))
        );
        assert_eq!(
            run.outcome.clone().unwrap_err().to_string(),
            "ranking model unavailable"
        );
        assert_eq!(
            run.stage(Stage::CurriculumDesign).unwrap().outcome,
            StageOutcome::Failed
        );
    }
}
