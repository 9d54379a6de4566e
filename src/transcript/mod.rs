//! Transcript retrieval.
//!
//! Provides a trait-based interface over transcript providers, plus the
//! language selection rule shared by implementations.

mod youtube;

pub use youtube::{extract_video_id, YoutubeTranscriptSource};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A transcript as returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedTranscript {
    /// Video the transcript belongs to.
    pub video_id: String,
    /// Language code (e.g. "en", "hi").
    pub language_code: String,
    /// Human-readable language name, if the provider reports one.
    pub language: Option<String>,
    /// Whether the transcript was auto-generated.
    pub is_generated: bool,
    /// Full transcript text, segments joined by spaces.
    pub text: String,
}

impl FetchedTranscript {
    /// Display title for a session built from this transcript.
    pub fn title(&self) -> String {
        format!("Video_{} ({})", self.video_id, self.language_code)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<FetchedTranscript>;
}

/// Outcome of picking a transcript language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChoice<'a> {
    /// One of the preferred languages is available.
    Preferred(&'a str),
    /// None were; the first available transcript is used instead.
    Fallback(&'a str),
}

impl<'a> LanguageChoice<'a> {
    pub fn code(&self) -> &'a str {
        match self {
            LanguageChoice::Preferred(code) | LanguageChoice::Fallback(code) => code,
        }
    }
}

/// Pick the first preferred language present in `available`, falling back to
/// the first available transcript. Returns `None` only when nothing is available.
pub fn select_language<'a, S: AsRef<str>>(
    available: &'a [String],
    preferred: &[S],
) -> Option<LanguageChoice<'a>> {
    for lang in preferred {
        if let Some(code) = available.iter().find(|c| c.as_str() == lang.as_ref()) {
            return Some(LanguageChoice::Preferred(code));
        }
    }

    let first = available.first()?;
    let wanted: Vec<&str> = preferred.iter().map(AsRef::as_ref).collect();
    warn!(
        "No transcript in {:?}; falling back to first available ({})",
        wanted, first
    );
    Some(LanguageChoice::Fallback(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_prefers_english() {
        let available = langs(&["hi", "en", "fr"]);
        assert_eq!(
            select_language(&available, &["en"]),
            Some(LanguageChoice::Preferred("en"))
        );
    }

    #[test]
    fn test_preference_order() {
        let available = langs(&["de", "fr"]);
        assert_eq!(
            select_language(&available, &["en", "fr", "de"]),
            Some(LanguageChoice::Preferred("fr"))
        );
    }

    #[test]
    fn test_falls_back_to_first_available() {
        let available = langs(&["hi", "ta"]);
        let choice = select_language(&available, &["en"]).unwrap();
        assert_eq!(choice, LanguageChoice::Fallback("hi"));
        assert_eq!(choice.code(), "hi");
    }

    #[test]
    fn test_nothing_available() {
        let available: Vec<String> = Vec::new();
        assert_eq!(select_language(&available, &["en"]), None);
    }

    #[test]
    fn test_title_format() {
        let transcript = FetchedTranscript {
            video_id: "abc123".into(),
            language_code: "hi".into(),
            language: Some("Hindi".into()),
            is_generated: true,
            text: "namaste duniya".into(),
        };
        assert_eq!(transcript.title(), "Video_abc123 (hi)");
        assert_eq!(transcript.word_count(), 2);
    }
}
