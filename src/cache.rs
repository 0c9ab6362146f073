//! Path keyed response cache.
//!
//! Successful GET bodies are stored fully serialized, keyed by the exact
//! request path, and live until a write handler invalidates them. There is
//! no expiry; correctness depends on the invalidation sets in the route
//! handlers.

use std::sync::Arc;

use dashmap::DashMap;

#[derive(Clone, Debug, Default)]
pub struct ResponseCache {
    entries: Arc<DashMap<String, String>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, path: &str, body: String) {
        self.entries.insert(path.to_owned(), body);
    }

    pub fn delete(&self, path: &str) {
        self.entries.remove(path);
    }

    /// Drops every listed path. Paths that were never cached are fine to
    /// list; invalidation sets are supersets of what is actually stored.
    pub fn delete_many<I>(&self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        for path in paths {
            self.entries.remove(&path);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
