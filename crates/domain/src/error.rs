//! Error types for the domain crate.
//!
//! These are boundary faults: a request that trips one of them never reaches
//! the orchestrator. Everything past the boundary reports failures as data.

use thiserror::Error;

/// Reasons an onboarding or translation request is rejected before any agent runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// `goals` must contain at least one entry
    #[error("At least one goal is required")]
    EmptyGoals,

    /// A goal entry was empty or whitespace only
    #[error("Goal at position {index} is blank")]
    BlankGoal { index: usize },

    /// Neither `telegram_user_info.id` nor `telegram_user_id` was supplied
    #[error("A Telegram user id is required")]
    MissingTelegramUser,

    /// `linkedin_profile_data` was present but not a JSON object
    #[error("LinkedIn profile data must be an object, got {0}")]
    InvalidProfileData(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DomainError>;
