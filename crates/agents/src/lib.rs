//! Agents for learning-path generation.
//!
//! This crate provides:
//! - the `Agent` trait, a uniform `process(input) -> output` capability
//! - `ProfileAnalyzerAgent`: raw profile data to summary + skills
//! - `ContentScoutAgent`: keywords to candidate videos
//! - `CurriculumDesignerAgent`: candidate videos to an ordered learning path
//! - `TranslationAgent`: text to translated text, never losing the original
//!
//! ## Architecture
//! Agents never return `Err`. Each output type carries an optional `error`
//! alongside default data, exposed through `AgentOutput::error`. Callers decide
//! which errors matter.
//!
//! ## Example Usage
//! ```ignore
//! use agents::{Agent, ContentScoutAgent, ScoutRequest};
//!
//! let scout = ContentScoutAgent::new(Arc::new(youtube_client));
//! let output = scout.process(ScoutRequest::new(keywords).with_max_results(10)).await;
//! if let Some(err) = output.error() {
//!     tracing::warn!("scouting degraded: {}", err);
//! }
//! ```

pub mod content_scout;
pub mod curriculum_designer;
pub mod profile_analyzer;
pub mod traits;
pub mod translation;

// Re-export main types
pub use content_scout::{ContentScoutAgent, ScoutOutput, ScoutRequest};
pub use curriculum_designer::{CurriculumDesignerAgent, DesignOutput, DesignRequest};
pub use profile_analyzer::{NO_PROFILE_SUMMARY, ProfileAnalyzerAgent, ProfileOutput};
pub use traits::{Agent, AgentOutput};
pub use translation::{TranslateOutput, TranslationAgent};
