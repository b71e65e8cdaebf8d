//! JSON file cache implementation.
//!
//! Stores each entry as `<key>.json` under the cache root and keeps a small
//! per-entry meta marker (version + updated_at) under `meta/`. Freshness is
//! judged from the marker, so an entry without one is always stale.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;
use super::{Cache, CacheEntry, Result};

/// File-based JSON cache backend.
pub struct JsonCache {
    root: PathBuf,
}

impl JsonCache {
    /// Open a cache rooted at `root`, creating the directories it needs.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join("meta")).await?;

        Ok(Self { root })
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join("meta").join(format!("{}.meta.json", sanitize_key(key)))
    }

    /// Read and increment the entry version, stamping `updated_at`.
    async fn bump_version(&self, key: &str) -> Result<u64> {
        let path = self.meta_path(key);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }

    async fn read_updated_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let s = fs::read_to_string(self.meta_path(key)).await.ok()?;
        let json: serde_json::Value = serde_json::from_str(&s).ok()?;
        serde_json::from_value(json.get("updated_at")?.clone()).ok()
    }
}

#[async_trait]
impl Cache for JsonCache {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let Some(value) = read_json(&self.value_path(key)).await? else {
            return Ok(None);
        };
        let updated_at = self
            .read_updated_at(key)
            .await
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Ok(Some(CacheEntry { value, updated_at }))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let json = serde_json::to_string_pretty(&value)?;
        fs::write(self.value_path(key), json.as_bytes()).await?;

        let version = self.bump_version(key).await?;
        debug!("Cached {} (version {})", key, version);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        for path in [self.value_path(key), self.meta_path(key)] {
            fs::remove_file(path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        Ok(())
    }
}

/// Map a key onto a safe file stem.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
