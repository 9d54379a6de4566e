//! YouTube transcript source.

use super::{select_language, FetchedTranscript, LanguageChoice, TranscriptSource};
use crate::error::{Result, VidnotesError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Watch, short and embed URL forms. The ID runs until a query/fragment
/// delimiter, a slash or whitespace.
static VIDEO_URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&?#/\s]+)").expect("Invalid regex"),
        Regex::new(r"youtube\.com/embed/([^&?#/\s]+)").expect("Invalid regex"),
    ]
});

/// Extract the video ID from a YouTube URL.
///
/// Purely syntactic; no network access.
pub fn extract_video_id(url: &str) -> Result<String> {
    VIDEO_URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| VidnotesError::InvalidInput(format!("Invalid YouTube URL: {}", url)))
}

/// Order transcript languages deterministically: manual captions before
/// auto-generated ones, then by language code. The listing itself is unordered.
fn ordered_language_codes(tracks: impl IntoIterator<Item = (bool, String)>) -> Vec<String> {
    let mut tracks: Vec<(bool, String)> = tracks.into_iter().collect();
    tracks.sort();
    tracks.into_iter().map(|(_, code)| code).collect()
}

/// Fetches public YouTube captions.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
    preferred_languages: Vec<String>,
}

impl YoutubeTranscriptSource {
    /// Create a source that prefers the given language codes, in order.
    pub fn new(preferred_languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidnotesError::Transcript(format!("Failed to initialise transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            preferred_languages,
        })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<FetchedTranscript> {
        let listing = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| VidnotesError::Transcript(e.to_string()))?;

        let available = ordered_language_codes(
            listing
                .transcripts()
                .map(|t| (t.is_generated, t.language_code.clone())),
        );
        debug!("Available transcripts: {:?}", available);

        let choice = select_language(&available, &self.preferred_languages).ok_or_else(|| {
            VidnotesError::Transcript(format!("No transcripts available for {}", video_id))
        })?;
        if let LanguageChoice::Preferred(code) = choice {
            info!("Using {} transcript", code);
        }

        let fetched = self
            .api
            .fetch_transcript(video_id, &[choice.code()], false)
            .await
            .map_err(|e| VidnotesError::Transcript(e.to_string()))?;

        let text = fetched
            .snippets
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.trim().is_empty() {
            return Err(VidnotesError::Transcript(format!(
                "Transcript for {} is empty",
                video_id
            )));
        }

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language_code: fetched.language_code.clone(),
            language: Some(fetched.language.clone()),
            is_generated: fetched.is_generated,
            text,
        })
    }
}
