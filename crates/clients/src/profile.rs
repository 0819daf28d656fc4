//! Profile analysis over parsed LinkedIn data.
//!
//! The frontend forwards whatever LinkedIn fields it obtained as a JSON
//! object. This analyzer pulls a one-line summary and a skill list out of it.
//!
//! ## Accepted shapes
//! - summary: `summary`, then `headline`, then `about` (first non-blank string)
//! - skills: `skills` as an array of strings or of `{ "name": "..." }` objects

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use domain::{ProfileAnalysis, ProfileData};

use crate::ProfileAnalyzer;
use crate::error::ProfileError;

const SUMMARY_FIELDS: [&str; 3] = ["summary", "headline", "about"];

#[derive(Debug, Clone, Default)]
pub struct LinkedInProfileAnalyzer;

impl LinkedInProfileAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn extract_summary(profile: &ProfileData) -> Option<String> {
        SUMMARY_FIELDS
            .iter()
            .filter_map(|field| profile.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn extract_skills(profile: &ProfileData) -> Result<Vec<String>, ProfileError> {
        let entries = match profile.get("skills") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(ProfileError::Malformed("skills must be an array".into())),
        };

        let mut seen = HashSet::new();
        let mut skills = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = match entry {
                Value::String(name) => name.as_str(),
                Value::Object(obj) => obj.get("name").and_then(Value::as_str).unwrap_or(""),
                _ => {
                    return Err(ProfileError::Malformed(
                        "skill entries must be strings or objects with a name".into(),
                    ));
                }
            };
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                skills.push(name.to_string());
            }
        }
        Ok(skills)
    }
}

#[async_trait]
impl ProfileAnalyzer for LinkedInProfileAnalyzer {
    async fn analyze_profile(&self, profile: &ProfileData) -> Result<ProfileAnalysis, ProfileError> {
        let skills = Self::extract_skills(profile)?;
        let summary = Self::extract_summary(profile);

        if summary.is_none() && skills.is_empty() {
            return Err(ProfileError::Empty);
        }

        debug!("Extracted {} skills from profile", skills.len());
        Ok(ProfileAnalysis {
            summary: summary.unwrap_or_default(),
            skills,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> ProfileData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test profile must be an object"),
        }
    }

    #[tokio::test]
    async fn test_summary_prefers_summary_over_headline() {
        let analyzer = LinkedInProfileAnalyzer::new();
        let analysis = analyzer
            .analyze_profile(&profile(json!({
                "headline": "Technical Recruiter",
                "summary": "Ten years hiring engineers",
                "skills": ["Sourcing", {"name": "ATS"}, "sourcing", "  "]
            })))
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Ten years hiring engineers");
        assert_eq!(analysis.skills, vec!["Sourcing".to_string(), "ATS".to_string()]);
    }

    #[tokio::test]
    async fn test_headline_used_when_summary_blank() {
        let analyzer = LinkedInProfileAnalyzer::new();
        let analysis = analyzer
            .analyze_profile(&profile(json!({"summary": " ", "headline": "Sourcer"})))
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Sourcer");
        assert!(analysis.skills.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_skills_are_malformed() {
        let analyzer = LinkedInProfileAnalyzer::new();
        let err = analyzer
            .analyze_profile(&profile(json!({"skills": "sourcing"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_profile_without_content_is_empty() {
        let analyzer = LinkedInProfileAnalyzer::new();
        let err = analyzer
            .analyze_profile(&profile(json!({"firstName": "Amina"})))
            .await
            .unwrap_err();
        assert_eq!(err, ProfileError::Empty);
    }
}
