//! In-memory store for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{KeyValueStore, Result};

/// Key-value store backed by a shared map.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.lock().await.len()
    }

    /// Whether nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.values.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_values() {
        let mut store = MemoryStore::new();
        let reader = store.clone();
        assert!(reader.is_empty().await);

        store.set("k", b"v").await.unwrap();

        assert_eq!(reader.get("k").await.unwrap(), Some(b"v".to_vec()));
        assert_eq!(reader.len().await, 1);
        assert_eq!(reader.get("other").await.unwrap(), None);
    }
}
