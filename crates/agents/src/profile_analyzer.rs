//! Profile analyzer agent: summary and skills from raw profile data.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use clients::ProfileAnalyzer;
use domain::ProfileData;

use crate::traits::{Agent, AgentOutput};

/// Summary used whenever no usable profile is available
pub const NO_PROFILE_SUMMARY: &str = "No LinkedIn profile provided.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutput {
    pub summary: String,
    pub skills: Vec<String>,
    pub error: Option<String>,
}

impl Default for ProfileOutput {
    fn default() -> Self {
        Self {
            summary: NO_PROFILE_SUMMARY.to_string(),
            skills: Vec::new(),
            error: None,
        }
    }
}

impl AgentOutput for ProfileOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct ProfileAnalyzerAgent {
    analyzer: Arc<dyn ProfileAnalyzer>,
}

impl ProfileAnalyzerAgent {
    pub fn new(analyzer: Arc<dyn ProfileAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl fmt::Debug for ProfileAnalyzerAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProfileAnalyzerAgent(name={})", self.name())
    }
}

#[async_trait]
impl Agent for ProfileAnalyzerAgent {
    type Input = ProfileData;
    type Output = ProfileOutput;

    fn name(&self) -> &str {
        "ProfileAnalyzer"
    }

    async fn process(&self, input: ProfileData) -> ProfileOutput {
        match self.analyzer.analyze_profile(&input).await {
            Ok(analysis) => {
                info!(agent = self.name(), skills = analysis.skills.len(), "Profile analyzed");
                let summary = if analysis.summary.trim().is_empty() {
                    NO_PROFILE_SUMMARY.to_string()
                } else {
                    analysis.summary
                };
                ProfileOutput {
                    summary,
                    skills: analysis.skills,
                    error: None,
                }
            }
            Err(e) => {
                warn!(agent = self.name(), error = %e, "Profile analysis failed");
                ProfileOutput {
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::LinkedInProfileAnalyzer;
    use serde_json::{Value, json};

    fn profile(value: Value) -> ProfileData {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn test_skills_without_summary_get_sentinel() {
        let agent = ProfileAnalyzerAgent::new(Arc::new(LinkedInProfileAnalyzer::new()));

        let output = agent.process(profile(json!({"skills": ["Sourcing"]}))).await;

        assert!(output.is_ok());
        assert_eq!(output.summary, NO_PROFILE_SUMMARY);
        assert_eq!(output.skills, vec!["Sourcing".to_string()]);
    }

    #[tokio::test]
    async fn test_fault_yields_defaults_and_error() {
        let agent = ProfileAnalyzerAgent::new(Arc::new(LinkedInProfileAnalyzer::new()));

        let output = agent.process(profile(json!({"skills": 12}))).await;

        assert_eq!(output.summary, NO_PROFILE_SUMMARY);
        assert!(output.skills.is_empty());
        assert!(output.error.unwrap().starts_with("Malformed profile data"));
    }
}
