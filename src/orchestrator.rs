//! Pipeline orchestrator for vidnotes.
//!
//! Coordinates session creation (fetch, chunk, embed, index) and autocomplete
//! (look up, retrieve, complete).

use crate::chunking::WordChunker;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, VidnotesError};
use crate::rag::{ChatCompleter, Completer, Retriever};
use crate::session::{SessionId, SessionStore, SessionSummary};
use crate::transcript::{extract_video_id, TranscriptSource, YoutubeTranscriptSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The main orchestrator for the vidnotes pipeline.
pub struct Orchestrator {
    settings: Settings,
    store: Arc<SessionStore>,
    transcripts: Arc<dyn TranscriptSource>,
    retriever: Retriever,
    completer: Arc<dyn Completer>,
    chunker: WordChunker,
}

/// Result of creating a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub video_id: String,
    pub title: String,
    pub language_code: String,
    /// Transcript length in characters.
    pub transcript_length: usize,
    pub chunk_count: usize,
}

/// An autocomplete request against an existing session.
#[derive(Debug, Clone)]
pub struct AutocompleteRequest {
    pub session_id: SessionId,
    /// The user's notes so far; used verbatim as the retrieval query.
    pub current_text: String,
    /// Accepted but unused.
    pub cursor_position: usize,
}

/// A suggested continuation and the transcript context it was grounded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
    pub context: String,
}

impl Orchestrator {
    /// Create an orchestrator with the default YouTube and OpenAI-compatible components.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let timeout = Duration::from_secs(settings.http.timeout_seconds);

        let transcripts: Arc<dyn TranscriptSource> = Arc::new(YoutubeTranscriptSource::new(
            settings.transcript.preferred_languages.clone(),
        )?);

        let embedder: Arc<dyn Embedder> =
            Arc::new(OpenAIEmbedder::from_settings(&settings.embedding, timeout)?);

        info!(
            "Using {} for embeddings and {} for completions",
            settings.embedding.model, settings.completion.model
        );
        let completer: Arc<dyn Completer> = Arc::new(ChatCompleter::from_settings(
            &settings.completion,
            prompts,
            timeout,
        )?);

        Ok(Self::with_components(settings, transcripts, embedder, completer))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        transcripts: Arc<dyn TranscriptSource>,
        embedder: Arc<dyn Embedder>,
        completer: Arc<dyn Completer>,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let retriever = Retriever::new(store.clone(), embedder);
        let chunker = WordChunker::with_chunk_size(settings.chunking.chunk_size);

        Self {
            settings,
            store,
            transcripts,
            retriever,
            completer,
            chunker,
        }
    }

    /// Get the session store.
    pub fn store(&self) -> Arc<SessionStore> {
        self.store.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch a video's transcript, chunk it, index it and register a session.
    #[instrument(skip(self))]
    pub async fn create_session(&self, youtube_url: &str) -> Result<CreatedSession> {
        let video_id = extract_video_id(youtube_url)?;

        info!("Fetching transcript for {}", video_id);
        let transcript = self.transcripts.fetch(&video_id).await?;
        let title = transcript.title();

        let chunks = self.chunker.chunk(&transcript.text);
        if chunks.is_empty() {
            return Err(VidnotesError::Transcript(format!(
                "Transcript for {} has no words",
                video_id
            )));
        }
        let chunk_count = chunks.len();
        info!("Split transcript into {} chunks", chunk_count);

        let transcript_length = transcript.text.chars().count();
        let index = self.retriever.build_index(&chunks).await?;

        let session_id = self
            .store
            .create(&video_id, &title, transcript.text, chunks, index)
            .await;

        info!("Session {} ready ({})", session_id, title);

        Ok(CreatedSession {
            session_id,
            video_id,
            title,
            language_code: transcript.language_code,
            transcript_length,
            chunk_count,
        })
    }

    /// Suggest a continuation for the notes in `request`.
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub async fn autocomplete(&self, request: &AutocompleteRequest) -> Result<Suggestion> {
        if !self.store.contains(&request.session_id).await {
            return Err(VidnotesError::SessionNotFound(request.session_id.to_string()));
        }

        let context = self
            .retriever
            .retrieve(
                &request.session_id,
                &request.current_text,
                self.settings.retrieval.top_k,
            )
            .await?;

        let suggestion = self
            .completer
            .complete(&request.current_text, &context)
            .await?;

        Ok(Suggestion {
            suggestion,
            context,
        })
    }

    /// Summaries of all active sessions.
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store.list().await
    }

    /// Delete a session and its index.
    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        self.store.delete(session_id).await?;
        info!("Session {} deleted", session_id);
        Ok(())
    }

    /// Drop all sessions. Called when the server shuts down.
    pub async fn shutdown(&self) {
        let count = self.store.len().await;
        self.store.clear().await;
        info!("Discarded {} sessions", count);
    }
}
