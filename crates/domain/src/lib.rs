//! # Domain Crate
//!
//! Value types for the Madrasa learning-path service.
//!
//! ## Main Components
//!
//! - **types**: onboarding input, videos, learning-path steps, translation payloads
//! - **keywords**: the deduplicated keyword set handed to the content scout
//! - **error**: boundary validation errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use domain::{KeywordSet, PathRequest};
//!
//! let request = PathRequest::new(42, "recruiter", vec!["sourcing".into()])?;
//! let keywords = KeywordSet::derive(&request.goals, &[], &request.persona, &["sourcing"]);
//! assert_eq!(keywords.to_query(), "recruiter sourcing");
//! ```

pub mod error;
pub mod keywords;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DomainError, Result};
pub use keywords::KeywordSet;
pub use types::{
    DEFAULT_TARGET_LANGUAGE, LearningPath, LearningPathStep, PathRequest, ProfileAnalysis,
    ProfileData, TelegramUserId, TelegramUserInfo, TranslationRequest, TranslationResponse,
    UNKNOWN_PERSONA, UserOnboardingInput, Video,
};
