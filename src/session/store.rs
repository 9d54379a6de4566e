//! In-memory session store.

use super::{Session, SessionId, SessionSummary};
use crate::error::{Result, VidnotesError};
use crate::vector_index::FlatL2Index;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A session and its vector index.
struct SessionEntry {
    session: Arc<Session>,
    index: Arc<FlatL2Index>,
}

/// Process-wide owner of all sessions and their indexes.
///
/// Nothing is persisted. Metadata and index live in one map entry, inserted and
/// removed together, so a session is never visible without its index.
pub struct SessionStore {
    entries: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a new session with its fully built index and return its fresh identifier.
    pub async fn create(
        &self,
        video_id: &str,
        title: &str,
        transcript: String,
        chunks: Vec<String>,
        index: FlatL2Index,
    ) -> SessionId {
        let mut entries = self.entries.write().await;

        let mut id = SessionId::new();
        while entries.contains_key(&id) {
            id = SessionId::new();
        }

        let session = Session {
            id,
            video_id: video_id.to_string(),
            title: title.to_string(),
            transcript,
            chunks,
            created_at: Utc::now(),
        };
        entries.insert(
            id,
            SessionEntry {
                session: Arc::new(session),
                index: Arc::new(index),
            },
        );

        debug!(session_id = %id, "Session created");
        id
    }

    /// Look up a session.
    pub async fn get(&self, id: &SessionId) -> Result<Arc<Session>> {
        let entries = self.entries.read().await;
        entries
            .get(id)
            .map(|entry| entry.session.clone())
            .ok_or_else(|| not_found(id))
    }

    /// Whether the session exists.
    pub async fn contains(&self, id: &SessionId) -> bool {
        self.entries.read().await.contains_key(id)
    }

    /// Remove a session together with its index.
    pub async fn delete(&self, id: &SessionId) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(id).map(|_| ()).ok_or_else(|| not_found(id))?;
        debug!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Summaries of all sessions, oldest first.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let entries = self.entries.read().await;
        let mut sessions: Vec<&Arc<Session>> = entries.values().map(|e| &e.session).collect();
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        sessions.into_iter().map(|s| s.summary()).collect()
    }

    /// The session's index.
    pub async fn index(&self, id: &SessionId) -> Result<Arc<FlatL2Index>> {
        let entries = self.entries.read().await;
        entries
            .get(id)
            .map(|entry| entry.index.clone())
            .ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every session.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        debug!("Cleared {} sessions", count);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &SessionId) -> VidnotesError {
    VidnotesError::SessionNotFound(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn index_for(chunks: &[&str]) -> FlatL2Index {
        let vectors = (0..chunks.len()).map(|i| vec![i as f32, 1.0]).collect();
        FlatL2Index::build(vectors, chunks.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    async fn create_empty(store: &SessionStore, video_id: &str, title: &str) -> SessionId {
        store
            .create(video_id, title, String::new(), Vec::new(), index_for(&[]))
            .await
    }

    async fn store_with_session() -> (SessionStore, SessionId) {
        let store = SessionStore::new();
        let id = store
            .create(
                "dQw4w9WgXcQ",
                "Video_dQw4w9WgXcQ (en)",
                "the cat sat on the mat".to_string(),
                vec!["the cat sat on the mat".to_string()],
                index_for(&["the cat sat on the mat"]),
            )
            .await;
        (store, id)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (store, id) = store_with_session().await;

        let session = store.get(&id).await.unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.video_id, "dQw4w9WgXcQ");
        assert_eq!(session.title, "Video_dQw4w9WgXcQ (en)");
        assert_eq!(session.chunks.len(), 1);
    }

    #[tokio::test]
    async fn test_index_stored_with_session() {
        let (store, id) = store_with_session().await;

        let index = store.index(&id).await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.chunk(0), Some("the cat sat on the mat"));
    }

    #[tokio::test]
    async fn test_delete_removes_session_and_index() {
        let (store, id) = store_with_session().await;

        store.delete(&id).await.unwrap();

        assert!(matches!(store.get(&id).await, Err(VidnotesError::SessionNotFound(_))));
        assert!(matches!(store.index(&id).await, Err(VidnotesError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_store_unchanged() {
        let (store, id) = store_with_session().await;

        let err = store.delete(&SessionId::new()).await.unwrap_err();
        assert!(matches!(err, VidnotesError::SessionNotFound(_)));
        assert_eq!(store.len().await, 1);
        assert!(store.get(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_index_of_unknown_session() {
        let store = SessionStore::new();
        assert!(matches!(
            store.index(&SessionId::new()).await,
            Err(VidnotesError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = SessionStore::new();
        let mut seen = HashSet::new();
        for i in 0..1000 {
            let id = create_empty(&store, &format!("video{}", i), "title").await;
            assert!(seen.insert(id), "duplicate session id {}", id);
        }
        assert_eq!(store.len().await, 1000);
    }

    #[tokio::test]
    async fn test_list_and_clear() {
        let store = SessionStore::new();
        let a = create_empty(&store, "aaa", "A").await;
        let b = create_empty(&store, "bbb", "B").await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        let ids: HashSet<SessionId> = listed.iter().map(|s| s.session_id).collect();
        assert!(ids.contains(&a) && ids.contains(&b));
        let entry = listed.iter().find(|s| s.session_id == b).unwrap();
        assert_eq!(entry.title, "B");
        assert_eq!(entry.video_id, "bbb");

        store.clear().await;
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }
}
