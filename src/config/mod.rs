//! Configuration module for vidnotes.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AutocompletePrompts, Prompts};
pub use settings::{
    ChunkingSettings, CompletionSettings, EmbeddingSettings, GeneralSettings, HttpSettings,
    PromptSettings, RetrievalSettings, ServerSettings, Settings, TranscriptSettings,
};
