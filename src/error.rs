//! Error types for vidnotes.

use thiserror::Error;

/// Library-level error type for vidnotes operations.
#[derive(Error, Debug)]
pub enum VidnotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Failed to fetch transcript: {0}")]
    Transcript(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification of failures, used to pick a status signal for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed caller input (e.g. an unrecognized video URL).
    InvalidInput,
    /// Unknown session.
    NotFound,
    /// Transcript fetch, embedding or language-model call failed.
    UpstreamFailure,
    /// Anything else.
    InternalFailure,
}

impl ErrorKind {
    /// Stable snake_case name, used in API error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::UpstreamFailure => "upstream_failure",
            ErrorKind::InternalFailure => "internal_failure",
        }
    }
}

impl VidnotesError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VidnotesError::InvalidInput(_) => ErrorKind::InvalidInput,
            VidnotesError::SessionNotFound(_) => ErrorKind::NotFound,
            VidnotesError::Transcript(_)
            | VidnotesError::Embedding(_)
            | VidnotesError::Completion(_)
            | VidnotesError::OpenAI(_)
            | VidnotesError::Http(_) => ErrorKind::UpstreamFailure,
            VidnotesError::Config(_)
            | VidnotesError::VectorIndex(_)
            | VidnotesError::Internal(_)
            | VidnotesError::Io(_)
            | VidnotesError::Json(_)
            | VidnotesError::TomlParse(_) => ErrorKind::InternalFailure,
        }
    }
}

/// Result type alias for vidnotes operations.
pub type Result<T> = std::result::Result<T, VidnotesError>;
