//! Errors raised by the external collaborators.
//!
//! Agents convert every one of these into an `error` string on their output,
//! so the messages here are what ends up in logs and API responses.

use thiserror::Error;

/// Longest upstream body excerpt kept in an error message
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when searching for videos
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Video search request failed: {0}")]
    Transport(String),

    #[error("Video search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from video search: {0}")]
    Decode(String),
}

/// Errors that can occur when translating text
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("HTTP Error: {0}")]
    Transport(String),

    #[error("Translation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from translation service: {0}")]
    Decode(String),

    #[error("Translation service returned no translations")]
    Empty,
}

/// Errors that can occur when analyzing profile data
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Malformed profile data: {0}")]
    Malformed(String),

    #[error("Profile data contains neither a summary nor skills")]
    Empty,
}

pub(crate) fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    short.push('…');
    short
}
