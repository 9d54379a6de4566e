//! Index construction and context retrieval for sessions.

use crate::embedding::Embedder;
use crate::error::{Result, VidnotesError};
use crate::session::{SessionId, SessionStore};
use crate::vector_index::FlatL2Index;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Builds per-session indexes and retrieves context from them.
pub struct Retriever {
    store: Arc<SessionStore>,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    pub fn new(store: Arc<SessionStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }

    /// Embed all chunks in one batch and build an index over them.
    ///
    /// The caller registers the index together with its session.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len()))]
    pub async fn build_index(&self, chunks: &[String]) -> Result<FlatL2Index> {
        let vectors = self.embedder.embed_batch(chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(VidnotesError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let index = FlatL2Index::build(vectors, chunks.to_vec())?;
        debug!(dimension = index.dimension(), "Index built");
        Ok(index)
    }

    /// Retrieve the `k` chunks nearest to `query`, joined by newlines, nearest first.
    #[instrument(skip(self, query), fields(session_id = %session_id))]
    pub async fn retrieve(&self, session_id: &SessionId, query: &str, k: usize) -> Result<String> {
        let index = self.store.index(session_id).await?;
        if index.is_empty() {
            return Ok(String::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let neighbors = index.search(&query_embedding, k.min(index.len()))?;

        debug!(
            "Retrieved {} chunks (closest distance {:?})",
            neighbors.len(),
            neighbors.first().map(|n| n.distance)
        );

        let context = neighbors
            .iter()
            .filter_map(|n| index.chunk(n.position))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::chunk_words;
    use crate::testing::FakeEmbedder;

    async fn indexed_session(
        store: &SessionStore,
        retriever: &Retriever,
        transcript: &str,
        chunk_size: usize,
    ) -> SessionId {
        let chunks = chunk_words(transcript, chunk_size);
        let index = retriever.build_index(&chunks).await.unwrap();
        store
            .create("vid", "Video_vid (en)", transcript.to_string(), chunks, index)
            .await
    }

    fn retriever_over(store: &Arc<SessionStore>) -> Retriever {
        Retriever::new(store.clone(), Arc::new(FakeEmbedder::new()))
    }

    #[tokio::test]
    async fn test_thousand_words_gives_two_vectors() {
        let embedder = Arc::new(FakeEmbedder::new());
        let retriever = Retriever::new(Arc::new(SessionStore::new()), embedder.clone());

        let transcript = (0..1000).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ");
        let chunks = chunk_words(&transcript, 500);
        assert_eq!(chunks.len(), 2);

        let index = retriever.build_index(&chunks).await.unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.dimension(), embedder.dimensions());
        assert_eq!(embedder.batch_calls(), 1);
    }

    #[tokio::test]
    async fn test_build_failure_returns_error() {
        let retriever = Retriever::new(Arc::new(SessionStore::new()), Arc::new(FakeEmbedder::failing()));
        let err = retriever.build_index(&["chunk".to_string()]).await.unwrap_err();
        assert!(matches!(err, VidnotesError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_single_chunk_is_the_context() {
        let store = Arc::new(SessionStore::new());
        let retriever = retriever_over(&store);

        let id = indexed_session(&store, &retriever, "the cat sat on the mat", 500).await;

        let context = retriever.retrieve(&id, "where is the cat", 3).await.unwrap();
        assert_eq!(context, "the cat sat on the mat");
    }

    #[tokio::test]
    async fn test_k_clamped_to_chunk_count() {
        let store = Arc::new(SessionStore::new());
        let retriever = retriever_over(&store);

        let id = indexed_session(&store, &retriever, "alpha beta gamma delta epsilon zeta", 3).await;

        let context = retriever.retrieve(&id, "alpha", 3).await.unwrap();
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&"alpha beta gamma"));
        assert!(lines.contains(&"delta epsilon zeta"));
    }

    #[tokio::test]
    async fn test_nearest_chunk_first() {
        let store = Arc::new(SessionStore::new());
        let retriever = retriever_over(&store);

        let transcript = "rust borrow checker lifetimes \
                          python garbage collector refcount \
                          cooking pasta boiling water";
        let id = indexed_session(&store, &retriever, transcript, 4).await;

        let context = retriever.retrieve(&id, "pasta water", 1).await.unwrap();
        assert_eq!(context, "cooking pasta boiling water");

        let context = retriever.retrieve(&id, "borrow checker", 3).await.unwrap();
        assert_eq!(context.lines().next(), Some("rust borrow checker lifetimes"));
        assert_eq!(context.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_retrieve_unknown_session() {
        let store = Arc::new(SessionStore::new());
        let retriever = retriever_over(&store);

        let err = retriever.retrieve(&SessionId::new(), "anything", 3).await.unwrap_err();
        assert!(matches!(err, VidnotesError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_retrieve_after_delete() {
        let store = Arc::new(SessionStore::new());
        let retriever = retriever_over(&store);

        let id = indexed_session(&store, &retriever, "the cat sat on the mat", 500).await;
        store.delete(&id).await.unwrap();

        let err = retriever.retrieve(&id, "cat", 3).await.unwrap_err();
        assert!(matches!(err, VidnotesError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_index_gives_empty_context() {
        let store = Arc::new(SessionStore::new());
        let embedder = Arc::new(FakeEmbedder::new());
        let retriever = Retriever::new(store.clone(), embedder.clone());

        let id = indexed_session(&store, &retriever, "", 500).await;

        assert_eq!(retriever.retrieve(&id, "anything", 3).await.unwrap(), "");
        assert_eq!(embedder.single_calls(), 0);
    }
}
