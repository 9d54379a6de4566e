//! Deterministic stand-ins for the external collaborators, for unit tests.

use crate::embedding::Embedder;
use crate::error::{Result, VidnotesError};
use crate::rag::Completer;
use crate::transcript::{FetchedTranscript, TranscriptSource};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

const FAKE_DIMENSIONS: usize = 256;

/// Hashed bag-of-words embedder. Texts sharing words land close together.
#[derive(Default)]
pub struct FakeEmbedder {
    single_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    fail: bool,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; FAKE_DIMENSIONS];
        for word in text.split_whitespace() {
            let word: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            if word.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            v[(hasher.finish() as usize) % FAKE_DIMENSIONS] += 1.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(VidnotesError::Embedding("fake embedder failure".into()));
        }
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(VidnotesError::Embedding("fake embedder failure".into()));
        }
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        FAKE_DIMENSIONS
    }
}

/// Embedder whose batch calls park until released, for observing in-flight work.
#[derive(Default)]
pub struct GatedEmbedder {
    inner: FakeEmbedder,
    entered: Notify,
    release: Notify,
}

impl GatedEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a batch call is parked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked batch call finish.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Embedder for GatedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

/// Completer that echoes a fixed suggestion and records what it was asked.
pub struct FakeCompleter {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeCompleter {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(current_text, context)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completer for FakeCompleter {
    async fn complete(&self, current_text: &str, context: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((current_text.to_string(), context.to_string()));
        self.reply
            .clone()
            .map_err(VidnotesError::Completion)
    }
}

/// Transcript source serving canned transcripts by video ID.
#[derive(Default)]
pub struct FakeTranscriptSource {
    transcripts: HashMap<String, (String, String)>,
    calls: AtomicUsize,
}

impl FakeTranscriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(mut self, video_id: &str, language_code: &str, text: &str) -> Self {
        self.transcripts.insert(
            video_id.to_string(),
            (language_code.to_string(), text.to_string()),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscriptSource {
    async fn fetch(&self, video_id: &str) -> Result<FetchedTranscript> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (language_code, text) = self
            .transcripts
            .get(video_id)
            .ok_or_else(|| VidnotesError::Transcript(format!("Transcripts are disabled for {}", video_id)))?;

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language_code: language_code.clone(),
            language: None,
            is_generated: false,
            text: text.clone(),
        })
    }
}
