//! vidnotes - transcript-grounded note autocomplete for YouTube videos
//!
//! A small backend that turns a YouTube video's captions into a per-session
//! retrieval index and uses it to complete the notes a viewer is writing.
//!
//! # Overview
//!
//! - Fetch a video's transcript, preferring the configured caption languages
//! - Split it into fixed-size word chunks and embed them into an in-memory L2 index
//! - Retrieve the chunks nearest to the notes so far and ask a chat model to continue them
//! - Expose all of it over a small HTTP API (`vidnotes serve`)
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `transcript` - Video id extraction and transcript fetching
//! - `chunking` - Word-count chunking
//! - `embedding` - Embedding generation
//! - `vector_index` - Exact L2 nearest-neighbor index
//! - `session` - In-memory session registry
//! - `rag` - Context retrieval and completion
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use vidnotes::config::Settings;
//! use vidnotes::orchestrator::{AutocompleteRequest, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = Orchestrator::new(Settings::load()?)?;
//!
//!     let created = orchestrator
//!         .create_session("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     let suggestion = orchestrator
//!         .autocomplete(&AutocompleteRequest {
//!             session_id: created.session_id,
//!             current_text: "The singer promises".to_string(),
//!             cursor_position: 19,
//!         })
//!         .await?;
//!     println!("{}", suggestion.suggestion);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod transcript;
pub mod vector_index;

#[cfg(test)]
mod testing;

pub use error::{Result, VidnotesError};
