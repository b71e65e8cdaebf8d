//! Cache-backed data source.
//!
//! Reads are answered from the cache while the entry is younger than
//! `max_age`. Otherwise the inner source is asked and the answer written
//! back. When the inner source fails transiently and a stale entry exists,
//! the stale entry is served instead.

use std::future::Future;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use wkdash_core::{Assignment, LevelProgress, User};
use wkdash_storage::{keys, Cache, CacheExt};
use crate::{DataSource, Result};

/// Cache policy.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entries older than this are refetched
    pub max_age: Duration,

    /// Ignore freshness and always refetch
    pub refresh: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::minutes(10),
            refresh: false,
        }
    }
}

/// A [`DataSource`] with a [`Cache`] in front of it.
pub struct CachedSource<D, C> {
    inner: D,
    cache: C,
    config: CacheConfig,
}

impl<D: DataSource, C: Cache> CachedSource<D, C> {
    /// Wrap `inner` with `cache`.
    pub fn new(inner: D, cache: C) -> Self {
        Self {
            inner,
            cache,
            config: CacheConfig::default(),
        }
    }

    /// Set the cache policy.
    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// The wrapped cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn cached<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let stored = match self.cache.load::<T>(key).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", key, e);
                None
            }
        };

        let stored = match stored {
            Some(hit) if !self.config.refresh && hit.is_fresh(self.config.max_age, Utc::now()) => {
                debug!("Cache hit for {}", key);
                return Ok(hit.value);
            }
            other => other,
        };

        match fetch().await {
            Ok(value) => {
                if let Err(e) = self.cache.store(key, &value).await {
                    warn!("Failed to cache {}: {}", key, e);
                }
                Ok(value)
            }
            Err(e) if e.is_transient() => match stored {
                Some(stale) => {
                    warn!(
                        "Serving stale {} from {} after fetch failure: {}",
                        key, stale.updated_at, e
                    );
                    Ok(stale.value)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<D: DataSource, C: Cache> DataSource for CachedSource<D, C> {
    async fn user(&self) -> Result<User> {
        self.cached(keys::USER, || self.inner.user()).await
    }

    async fn assignments(&self, level: Option<u32>) -> Result<Vec<Assignment>> {
        let key = match level {
            Some(level) => keys::assignments_for_level(level),
            None => keys::ASSIGNMENTS_ALL.to_string(),
        };
        self.cached(&key, || self.inner.assignments(level)).await
    }

    async fn level_progressions(&self) -> Result<Vec<LevelProgress>> {
        self.cached(keys::LEVEL_PROGRESSIONS, || self.inner.level_progressions())
            .await
    }
}
