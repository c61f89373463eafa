use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, StoreError, store::DocumentStore};

#[derive(Default)]
struct State {
    documents: HashMap<(String, String), serde_json::Value>,
    fail_on_put: bool,
}

/// In-memory document store.
///
/// Used by tests and by the API when no database is configured. Writes can
/// be made to fail to exercise the checkout failure path.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail with `Unavailable`.
    pub async fn set_fail_on_put(&self, fail: bool) {
        self.state.write().await.fail_on_put = fail;
    }

    /// Returns the total number of documents across collections.
    pub async fn document_count(&self) -> usize {
        self.state.read().await.documents.len()
    }

    /// Clears all documents.
    pub async fn clear(&self) {
        self.state.write().await.documents.clear();
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, collection: &str, key: &str, value: serde_json::Value) -> Result<()> {
        let mut state = self.state.write().await;

        if state.fail_on_put {
            return Err(StoreError::Unavailable(
                "simulated write failure".to_string(),
            ));
        }

        let doc_key = (collection.to_string(), key.to_string());
        if state.documents.contains_key(&doc_key) {
            return Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }

        state.documents.insert(doc_key, value);
        tracing::debug!(collection, key, "document stored");
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<serde_json::Value>> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .keys()
            .filter(|(c, _)| c == collection)
            .count() as u64)
    }
}
