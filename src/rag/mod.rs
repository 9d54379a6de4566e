//! Retrieval-augmented autocomplete.
//!
//! `Retriever` turns a partially written note into transcript context;
//! `Completer` turns that context into a suggested continuation.

mod completion;
pub mod context;

pub use completion::{ChatCompleter, Completer};
pub use context::{Retriever, DEFAULT_TOP_K};
