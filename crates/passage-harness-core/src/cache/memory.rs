//! In-memory [`ContentCache`] implementation.
//!
//! Uses a `HashMap` behind `std::sync::RwLock`. A poisoned lock is
//! recovered rather than propagated: every value written for a path is
//! identical, so a panic mid-write cannot leave a torn entry behind.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{CacheError, ContentCache};

/// Process-wide, never-expiring cache of reference texts.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Arc<str>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentCache for InMemoryCache {
    fn has(&self, path: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn get(&self, path: &str) -> Result<Arc<str>, CacheError> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| CacheError::NotCached {
                path: path.to_string(),
            })
    }

    fn put(&self, path: &str, content: Arc<str>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_is_not_cached() {
        let cache = InMemoryCache::new();
        assert!(!cache.has("data/hod.txt"));
        assert_eq!(
            cache.get("data/hod.txt"),
            Err(CacheError::NotCached {
                path: "data/hod.txt".to_string()
            })
        );
    }

    #[test]
    fn test_put_then_get() {
        let cache = InMemoryCache::new();
        cache.put("data/hod.txt", Arc::from("The Nellie, a cruising yawl"));
        assert!(cache.has("data/hod.txt"));
        assert_eq!(&*cache.get("data/hod.txt").unwrap(), "The Nellie, a cruising yawl");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = InMemoryCache::new();
        cache.put("a", Arc::from("one"));
        cache.put("a", Arc::from("two"));
        assert_eq!(&*cache.get("a").unwrap(), "two");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(InMemoryCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.put("same", Arc::from("content")))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(&*cache.get("same").unwrap(), "content");
        assert_eq!(cache.len(), 1);
    }
}
