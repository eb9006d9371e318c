//! Reference text loading.
//!
//! [`DocumentLoader`] is the file-reading collaborator; [`FsLoader`] reads
//! from the local filesystem via `tokio::fs`. [`CachedLoader`] puts a
//! [`ContentCache`] in front of any loader so a reference text is read from
//! disk once per process.
//!
//! Read failures are reported as [`LoadError::Io`] and are never retried
//! here.

use async_trait::async_trait;
use passage_harness_core::cache::{ContentCache, InMemoryCache};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Document loading failures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a reference text by path.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String, LoadError>;
}

/// Loader backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

#[async_trait]
impl DocumentLoader for FsLoader {
    async fn read(&self, path: &Path) -> Result<String, LoadError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

/// A loader fronted by a content cache.
///
/// Cloning is cheap and clones share the same cache.
#[derive(Clone)]
pub struct CachedLoader {
    loader: Arc<dyn DocumentLoader>,
    cache: Arc<dyn ContentCache>,
}

impl CachedLoader {
    pub fn new(loader: Arc<dyn DocumentLoader>, cache: Arc<dyn ContentCache>) -> Self {
        Self { loader, cache }
    }

    /// Filesystem loader with a fresh in-memory cache.
    pub fn filesystem() -> Self {
        Self::new(Arc::new(FsLoader), Arc::new(InMemoryCache::new()))
    }

    pub fn cache(&self) -> &Arc<dyn ContentCache> {
        &self.cache
    }

    /// Return the cached text for `path`, reading and caching it on a miss.
    pub async fn load(&self, path: &Path) -> Result<Arc<str>, LoadError> {
        let key = path.to_string_lossy();

        if self.cache.has(&key) {
            if let Ok(content) = self.cache.get(&key) {
                debug!(path = %key, "reference text cache hit");
                return Ok(content);
            }
        }

        let content: Arc<str> = Arc::from(self.loader.read(path).await?);
        info!(
            path = %key,
            chars = content.chars().count(),
            "loaded reference text"
        );
        self.cache.put(&key, Arc::clone(&content));
        Ok(content)
    }
}
