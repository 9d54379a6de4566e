//! Transcript chunking.
//!
//! Transcripts are split into fixed-size, non-overlapping word windows. Chunk
//! `i` always covers words `[i * chunk_size, (i + 1) * chunk_size)`, so a
//! chunk's position doubles as its identity inside a session's index.

use serde::{Deserialize, Serialize};

/// Default number of words per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum words per chunk.
    pub chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Splits transcripts into word-bounded chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordChunker {
    config: ChunkingConfig,
}

impl WordChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Chunker with a specific chunk size. Zero is treated as one word.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::new(ChunkingConfig { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size.max(1)
    }

    /// Split `text` into chunks of at most `chunk_size` words.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        chunk_words(text, self.chunk_size())
    }
}

/// Split `text` on whitespace and regroup the words into chunks of at most
/// `chunk_size` words, joined by single spaces. The last chunk may be shorter.
pub fn chunk_words(text: &str, chunk_size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(chunk_size.max(1))
        .map(|window| window.join(" "))
        .collect()
}
