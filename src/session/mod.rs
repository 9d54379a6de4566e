//! Note-taking sessions.
//!
//! A session is the working context for one video: its transcript, the
//! transcript's chunks and the vector index built over them.

mod store;

pub use store::SessionStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A session's transcript and metadata. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// YouTube video ID the transcript came from.
    pub video_id: String,
    /// Human-readable title.
    pub title: String,
    /// Full transcript text.
    pub transcript: String,
    /// Transcript chunks, in transcript order.
    pub chunks: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Transcript length in characters.
    pub fn transcript_length(&self) -> usize {
        self.transcript.chars().count()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            title: self.title.clone(),
            video_id: self.video_id.clone(),
        }
    }
}

/// Listing entry for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub title: String,
    pub video_id: String,
}
