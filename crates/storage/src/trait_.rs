//! Cache trait abstraction.

use async_trait::async_trait;
use chrono::Duration;
use serde::{de::DeserializeOwned, Serialize};
use wkdash_core::Time;

/// Error type for cache operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Well-known cache keys.
pub mod keys {
    /// Personal API token
    pub const API_KEY: &str = "api_key";

    /// User profile
    pub const USER: &str = "user";

    /// All level progressions
    pub const LEVEL_PROGRESSIONS: &str = "level_progressions";

    /// Assignments across every level
    pub const ASSIGNMENTS_ALL: &str = "assignments_all";

    /// Assignments of one level.
    pub fn assignments_for_level(level: u32) -> String {
        format!("assignments_level_{}", level)
    }
}

/// A raw cached value and when it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Stored JSON
    pub value: serde_json::Value,

    /// Last write
    pub updated_at: Time,
}

/// A typed cached value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    /// Decoded value
    pub value: T,

    /// Last write
    pub updated_at: Time,
}

impl<T> Cached<T> {
    /// Whether the value was written less than `max_age` before `now`.
    pub fn is_fresh(&self, max_age: Duration, now: Time) -> bool {
        now - self.updated_at < max_age
    }
}

/// Key-value cache for fetched data.
///
/// This trait allows different backends to be plugged in. Keys are free-form;
/// backends that need to restrict characters do so themselves.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Load an entry by key.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Save an entry (create or replace).
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Delete an entry. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Typed helpers on top of [`Cache`].
#[async_trait]
pub trait CacheExt: Cache {
    /// Load and decode an entry.
    async fn load<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<Cached<T>>> {
        match self.get(key).await? {
            Some(entry) => Ok(Some(Cached {
                value: serde_json::from_value(entry.value)?,
                updated_at: entry.updated_at,
            })),
            None => Ok(None),
        }
    }

    /// Encode and save an entry.
    async fn store<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.set(key, json).await
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}
