//! Memoized shape lookups shared across batch workers.

use std::collections::HashMap;
use std::sync::RwLock;

use super::ContentShape;

/// Per-run cache of link -> shape, keyed by the exact link string.
///
/// Concurrent readers are cheap; a race where two workers classify the same
/// uncached link and both write resolves last-write-wins (both are expected
/// to compute the same value). Entries are never invalidated: one run works
/// against a fixed-time snapshot of remote state.
#[derive(Debug, Default)]
pub struct ShapeCache {
    inner: RwLock<HashMap<String, ContentShape>>,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, link: &str) -> Option<ContentShape> {
        self.inner.read().unwrap().get(link).copied()
    }

    pub fn insert(&self, link: &str, shape: ContentShape) {
        self.inner.write().unwrap().insert(link.to_string(), shape);
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
