//! Curriculum designer: orders candidate videos into a learning path.
//!
//! ## Algorithm
//! 1. Take the first `MAX_PATH_STEPS` videos in the order received
//! 2. Emit them as module 1, steps numbered from 1
//!
//! No ranking or filtering happens here. Goals, persona and profile summary
//! are accepted so a smarter selection can slot in without changing callers.
//! An empty video list yields an empty path, which is not an error.

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use domain::{LearningPath, LearningPathStep, Video};

use crate::traits::{Agent, AgentOutput};

/// Upper bound on steps in a generated path
pub const MAX_PATH_STEPS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignRequest {
    pub profile_summary: String,
    pub goals: Vec<String>,
    pub persona: String,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignOutput {
    pub learning_path: LearningPath,
    pub error: Option<String>,
}

impl AgentOutput for DesignOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Default)]
pub struct CurriculumDesignerAgent;

impl CurriculumDesignerAgent {
    pub fn new() -> Self {
        Self
    }

    fn design(videos: &[Video]) -> LearningPath {
        videos
            .iter()
            .take(MAX_PATH_STEPS)
            .zip(1u32..)
            .map(|(video, step)| LearningPathStep::from_video(1, step, video))
            .collect()
    }
}

impl fmt::Debug for CurriculumDesignerAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurriculumDesignerAgent(name={})", self.name())
    }
}

#[async_trait]
impl Agent for CurriculumDesignerAgent {
    type Input = DesignRequest;
    type Output = DesignOutput;

    fn name(&self) -> &str {
        "CurriculumDesigner"
    }

    async fn process(&self, input: DesignRequest) -> DesignOutput {
        info!(
            agent = self.name(),
            persona = %input.persona,
            goals = ?input.goals,
            candidates = input.videos.len(),
            "Designing curriculum"
        );

        let learning_path = Self::design(&input.videos);

        info!(agent = self.name(), steps = learning_path.len(), "Created learning path");
        DesignOutput {
            learning_path,
            error: None,
        }
    }
}
