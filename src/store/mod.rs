// SPDX-License-Identifier: MIT
//! Keyed store seam.
//!
//! Peripheral state (generation sessions today) lives behind this interface
//! so a persistent backing store can be substituted without touching
//! orchestration logic. Only `MemoryStore` ships: state does not survive a
//! daemon restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait Store<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, id: &str) -> Option<T>;
    async fn put(&self, id: &str, value: T);
    async fn list(&self) -> Vec<T>;
    /// Returns `true` if the id was present.
    async fn delete(&self, id: &str) -> bool;
}

/// In-memory store — a `HashMap` behind a tokio `RwLock`.
#[derive(Default)]
pub struct MemoryStore<T> {
    inner: RwLock<HashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<T> Store<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, id: &str) -> Option<T> {
        self.inner.read().await.get(id).cloned()
    }

    async fn put(&self, id: &str, value: T) {
        self.inner.write().await.insert(id.to_string(), value);
    }

    async fn list(&self) -> Vec<T> {
        self.inner.read().await.values().cloned().collect()
    }

    async fn delete(&self, id: &str) -> bool {
        self.inner.write().await.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let store = MemoryStore::new();
        store.put("a", 1u32).await;
        assert_eq!(store.get("a").await, Some(1));
        assert_eq!(store.list().await.len(), 1);
        assert!(store.delete("a").await);
        assert!(!store.delete("a").await);
        assert_eq!(store.get("a").await, None);
    }
}
