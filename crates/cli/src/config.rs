//! Command-line configuration and the stored login.

use std::path::PathBuf;
use anyhow::{bail, Result};
use clap::Args;
use wkdash_api::{CacheConfig, ClientConfig, DEFAULT_BASE_URL};
use wkdash_core::User;
use wkdash_storage::{keys, Cache, CacheExt};

/// Highest WaniKani level; bounds the per-level cache keys.
const MAX_LEVEL: u32 = 60;

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Cache directory
    #[arg(long, global = true, env = "WKDASH_CACHE_DIR", default_value = ".wkdash")]
    pub cache_dir: PathBuf,

    /// API token; overrides the one stored by `login`
    #[arg(long, global = true, env = "WANIKANI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API root
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds before cached data is refetched
    #[arg(long, global = true, default_value = "600")]
    pub max_age: u64,

    /// Refetch everything, ignoring the cache
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolved settings for the client and the cache.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP client
    pub client: ClientConfig,

    /// Cache policy
    pub cache: CacheConfig,
}

impl Settings {
    /// Build settings from the command line and a token.
    pub fn new(args: &GlobalArgs, api_key: String) -> Self {
        Self {
            client: ClientConfig::new(api_key).with_base_url(args.base_url.as_str()),
            cache: CacheConfig {
                max_age: i64::try_from(args.max_age)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .unwrap_or(chrono::Duration::MAX),
                refresh: args.refresh,
            },
        }
    }
}

/// Token from the flag or environment, else the stored one.
pub async fn resolve_api_key<C: Cache>(flag: Option<String>, cache: &C) -> Result<String> {
    if let Some(key) = flag.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        return Ok(key);
    }
    match cache.load::<String>(keys::API_KEY).await? {
        Some(stored) if !stored.value.is_empty() => Ok(stored.value),
        _ => bail!("No WaniKani API token. Run `wkdash login <token>` or set WANIKANI_API_KEY."),
    }
}

/// Store the token and the profile it belongs to.
///
/// Data cached under a previous token is dropped first.
pub async fn save_login<C: Cache>(cache: &C, api_key: &str, user: &User) -> Result<()> {
    clear_data(cache).await?;
    cache.store(keys::API_KEY, &api_key).await?;
    cache.store(keys::USER, user).await?;
    Ok(())
}

/// Remove the token and everything fetched with it.
pub async fn clear_login<C: Cache>(cache: &C) -> Result<()> {
    cache.remove(keys::API_KEY).await?;
    clear_data(cache).await
}

async fn clear_data<C: Cache>(cache: &C) -> Result<()> {
    for key in [keys::USER, keys::LEVEL_PROGRESSIONS, keys::ASSIGNMENTS_ALL] {
        cache.remove(key).await?;
    }
    for level in 1..=MAX_LEVEL {
        cache.remove(&keys::assignments_for_level(level)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wkdash_core::{Assignment, SubjectType};
    use wkdash_storage::{JsonCache, MemoryCache};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["wkdash", "--cache-dir", "/tmp/wk"]);
        let settings = Settings::new(&cli.global, "token".into());

        assert_eq!(settings.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.cache.max_age, chrono::Duration::minutes(10));
        assert!(!settings.cache.refresh);
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "wkdash",
            "--base-url",
            "http://localhost:9000/v2/",
            "--max-age",
            "30",
            "--refresh",
        ]);
        let settings = Settings::new(&cli.global, "token".into());

        assert_eq!(settings.client.base_url, "http://localhost:9000/v2");
        assert_eq!(settings.cache.max_age, chrono::Duration::seconds(30));
        assert!(settings.cache.refresh);
    }

    #[tokio::test]
    async fn test_flag_wins_over_stored_key() {
        let cache = MemoryCache::new();
        save_login(&cache, "stored", &User::new("koichi", 3)).await.unwrap();

        let key = resolve_api_key(Some(" flag ".into()), &cache).await.unwrap();
        assert_eq!(key, "flag");

        let key = resolve_api_key(None, &cache).await.unwrap();
        assert_eq!(key, "stored");
    }

    #[tokio::test]
    async fn test_missing_key_errors() {
        let cache = MemoryCache::new();
        let err = resolve_api_key(Some("  ".into()), &cache).await.unwrap_err();
        assert!(err.to_string().contains("wkdash login"));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let cache = MemoryCache::new();
        save_login(&cache, "stored", &User::new("koichi", 3)).await.unwrap();
        cache
            .store(&keys::assignments_for_level(3), &Vec::<u32>::new())
            .await
            .unwrap();

        clear_login(&cache).await.unwrap();
        assert!(cache.is_empty().await);
    }

    fn assignments(n: u64) -> Vec<Assignment> {
        (1..=n)
            .map(|id| Assignment::new(id, SubjectType::Kanji, 5u8))
            .collect()
    }

    #[tokio::test]
    async fn test_login_as_other_user_drops_cached_data() {
        let cache = MemoryCache::new();
        save_login(&cache, "alice-token", &User::new("alice", 10)).await.unwrap();
        cache.store(keys::ASSIGNMENTS_ALL, &assignments(500)).await.unwrap();
        cache.store(&keys::assignments_for_level(10), &assignments(40)).await.unwrap();
        cache.store(keys::LEVEL_PROGRESSIONS, &Vec::<u32>::new()).await.unwrap();

        save_login(&cache, "bob-token", &User::new("bob", 1)).await.unwrap();

        let all = cache.load::<Vec<Assignment>>(keys::ASSIGNMENTS_ALL).await.unwrap();
        assert!(all.is_none());
        let level = cache
            .load::<Vec<Assignment>>(&keys::assignments_for_level(10))
            .await
            .unwrap();
        assert!(level.is_none());
        let levels = cache.load::<Vec<u32>>(keys::LEVEL_PROGRESSIONS).await.unwrap();
        assert!(levels.is_none());

        let user = cache.load::<User>(keys::USER).await.unwrap().unwrap();
        assert_eq!(user.value.username, "bob");
        assert_eq!(resolve_api_key(None, &cache).await.unwrap(), "bob-token");
    }

    #[tokio::test]
    async fn test_logout_clears_file_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path()).await.unwrap();
        save_login(&cache, "stored", &User::new("koichi", 3)).await.unwrap();
        cache.store(keys::ASSIGNMENTS_ALL, &assignments(2)).await.unwrap();

        clear_login(&cache).await.unwrap();

        assert!(cache.load::<String>(keys::API_KEY).await.unwrap().is_none());
        assert!(cache.load::<User>(keys::USER).await.unwrap().is_none());
        let all = cache.load::<Vec<Assignment>>(keys::ASSIGNMENTS_ALL).await.unwrap();
        assert!(all.is_none());
        assert!(resolve_api_key(None, &cache).await.is_err());
    }
}
