//! Request-scoped value types shared by every crate in the workspace.
//!
//! Nothing here is persisted or cached. Each value is built for one
//! orchestration call (or one translation) and dropped with the response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Telegram's numeric user id
pub type TelegramUserId = i64;

/// Raw profile mapping as received from the client (parsed LinkedIn data)
pub type ProfileData = Map<String, Value>;

/// Ordered sequence of steps returned to the caller
pub type LearningPath = Vec<LearningPathStep>;

/// Persona used when the caller supplies a blank one
pub const UNKNOWN_PERSONA: &str = "Unknown";

// =============================================================================
// Onboarding
// =============================================================================

/// Telegram WebApp user block, as the mini-app frontend sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUserInfo {
    pub id: TelegramUserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Body of `POST /generate-path` before validation.
///
/// The user may be identified either through the nested `telegram_user_info`
/// block or the flat `telegram_user_id`; the nested form wins when both exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOnboardingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_user_info: Option<TelegramUserInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_user_id: Option<TelegramUserId>,
    pub persona: String,
    pub goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_data: Option<Value>,
}

impl UserOnboardingInput {
    pub fn telegram_user_id(&self) -> Option<TelegramUserId> {
        self.telegram_user_info
            .as_ref()
            .map(|info| info.id)
            .or(self.telegram_user_id)
    }
}

/// A validated onboarding request, the only shape the orchestrator accepts.
///
/// Invariants (checked by `TryFrom<UserOnboardingInput>`):
/// - `goals` is non-empty and no entry is blank
/// - `persona` is never blank
/// - `linkedin_data` is `Some` only for a non-empty object
#[derive(Debug, Clone, PartialEq)]
pub struct PathRequest {
    pub telegram_user_id: TelegramUserId,
    pub persona: String,
    pub goals: Vec<String>,
    pub linkedin_data: Option<ProfileData>,
}

impl PathRequest {
    /// Build a request directly (CLI and tests); runs the same validation as the HTTP boundary.
    pub fn new(
        telegram_user_id: TelegramUserId,
        persona: impl Into<String>,
        goals: Vec<String>,
    ) -> Result<Self> {
        Self::try_from(UserOnboardingInput {
            telegram_user_info: None,
            telegram_user_id: Some(telegram_user_id),
            persona: persona.into(),
            goals,
            linkedin_profile_data: None,
        })
    }

    /// Attach raw profile data; empty mappings are treated as absent.
    pub fn with_linkedin_data(mut self, data: ProfileData) -> Self {
        self.linkedin_data = (!data.is_empty()).then_some(data);
        self
    }
}

impl TryFrom<UserOnboardingInput> for PathRequest {
    type Error = DomainError;

    fn try_from(input: UserOnboardingInput) -> Result<Self> {
        let telegram_user_id = input
            .telegram_user_id()
            .ok_or(DomainError::MissingTelegramUser)?;

        if input.goals.is_empty() {
            return Err(DomainError::EmptyGoals);
        }
        if let Some(index) = input.goals.iter().position(|g| g.trim().is_empty()) {
            return Err(DomainError::BlankGoal { index });
        }

        let linkedin_data = match input.linkedin_profile_data {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => (!map.is_empty()).then_some(map),
            Some(other) => return Err(DomainError::InvalidProfileData(json_kind(&other).into())),
        };

        let persona = match input.persona.trim() {
            "" => UNKNOWN_PERSONA.to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Self {
            telegram_user_id,
            persona,
            goals: input.goals,
            linkedin_data,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Content
// =============================================================================

/// A candidate learning video produced by the search collaborator.
///
/// Immutable once produced; `id` is unique within one scouting result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Thumbnail URL
    pub thumbnail: String,
}

/// One entry of a learning path. `module` and `step` both start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathStep {
    pub module: u32,
    pub step: u32,
    pub video_id: String,
    pub title: String,
}

impl LearningPathStep {
    /// Copy `video_id` and `title` verbatim from the video.
    pub fn from_video(module: u32, step: u32, video: &Video) -> Self {
        Self {
            module,
            step,
            video_id: video.id.clone(),
            title: video.title.clone(),
        }
    }
}

/// Output of profile analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub summary: String,
    pub skills: Vec<String>,
}

// =============================================================================
// Translation
// =============================================================================

/// Language used when the caller does not name one
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

/// Body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: None,
        }
    }

    pub fn with_source(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = Some(source_language.into());
        self
    }
}

/// Response of `POST /translate`. `translated_text` is always displayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
