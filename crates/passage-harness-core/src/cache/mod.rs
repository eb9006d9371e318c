//! Content cache abstraction.
//!
//! The [`ContentCache`] trait memoizes loaded reference texts by path so
//! repeated questions avoid re-reading disk. The cache itself performs no
//! I/O: callers check [`has`](ContentCache::has), load on a miss, then
//! [`put`](ContentCache::put).
//!
//! Entries never expire. Concurrent `put`s for the same path race benignly
//! because the content for a path is always derived from the same source
//! file; the last write wins.

pub mod memory;

use std::sync::Arc;
use thiserror::Error;

pub use memory::InMemoryCache;

/// Cache lookup failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The path has not been stored. A normal control-flow signal, not a
    /// failure of the engine.
    #[error("not cached: {path}")]
    NotCached { path: String },
}

/// Path-keyed store of reference texts.
///
/// Implementations must be `Send + Sync` so a single cache can be shared
/// across request handlers behind an `Arc`.
pub trait ContentCache: Send + Sync {
    /// Whether content for `path` is present.
    fn has(&self, path: &str) -> bool;

    /// Cached content for `path`, or [`CacheError::NotCached`].
    fn get(&self, path: &str) -> Result<Arc<str>, CacheError>;

    /// Store content for `path`, replacing any previous value.
    fn put(&self, path: &str, content: Arc<str>);
}
