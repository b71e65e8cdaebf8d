//! WaniKani v2 REST client.

use std::future::Future;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use wkdash_core::{Assignment, LevelProgress, User};
use crate::wire::{AssignmentData, Collection, LevelProgressionData, Resource, UserData};
use crate::{ApiError, DataSource, Result};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.wanikani.com/v2";

/// API revision the wire types are written against.
const API_REVISION: &str = "20170710";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Personal API token
    pub api_key: String,

    /// Per-request timeout
    pub timeout: std::time::Duration,
}

impl ClientConfig {
    /// Configuration for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: std::time::Duration::from_secs(30),
        }
    }

    /// Use a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// WaniKani API client.
#[derive(Clone)]
pub struct WanikaniClient {
    /// HTTP client
    client: Client,

    /// Configuration
    config: ClientConfig,
}

impl WanikaniClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = ClientBuilder::new().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Fetch the user profile.
    pub async fn get_user(&self) -> Result<User> {
        let resource: Resource<UserData> = self.get_json(&self.url("user")).await?;
        Ok(User::from(resource))
    }

    /// Fetch every assignment across all levels.
    pub async fn get_all_assignments(&self) -> Result<Vec<Assignment>> {
        let resources = self
            .get_collection::<AssignmentData>(self.url("assignments"))
            .await?;
        let assignments = resources
            .into_iter()
            .map(Assignment::try_from)
            .collect::<Result<Vec<_>>>()?;

        info!("Fetched {} assignments", assignments.len());
        Ok(assignments)
    }

    /// Fetch the assignments of one level.
    pub async fn get_assignments_for_level(&self, level: u32) -> Result<Vec<Assignment>> {
        let url = format!("{}?levels={}", self.url("assignments"), level);
        let resources = self.get_collection::<AssignmentData>(url).await?;
        let assignments = resources
            .into_iter()
            .map(Assignment::try_from)
            .collect::<Result<Vec<_>>>()?;

        info!("Fetched {} assignments for level {}", assignments.len(), level);
        Ok(assignments)
    }

    /// Fetch level progressions, ordered by level.
    pub async fn get_level_progressions(&self) -> Result<Vec<LevelProgress>> {
        let resources = self
            .get_collection::<LevelProgressionData>(self.url("level_progressions"))
            .await?;
        let mut levels = resources
            .into_iter()
            .map(LevelProgress::try_from)
            .collect::<Result<Vec<_>>>()?;
        levels.sort_by_key(|l| l.level);

        info!("Fetched {} level progressions", levels.len());
        Ok(levels)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn get_collection<T: DeserializeOwned>(&self, url: String) -> Result<Vec<Resource<T>>> {
        collect_pages(url, |url| async move { self.get_json::<Collection<T>>(&url).await }).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_key)
            .header("Wanikani-Revision", API_REVISION)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_status(status, body.as_str())?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DataSource for WanikaniClient {
    async fn user(&self) -> Result<User> {
        self.get_user().await
    }

    async fn assignments(&self, level: Option<u32>) -> Result<Vec<Assignment>> {
        match level {
            Some(level) => self.get_assignments_for_level(level).await,
            None => self.get_all_assignments().await,
        }
    }

    async fn level_progressions(&self) -> Result<Vec<LevelProgress>> {
        self.get_level_progressions().await
    }
}

/// Follow `pages.next_url` from `first` until the last page.
async fn collect_pages<T, F, Fut>(first: String, mut fetch: F) -> Result<Vec<Resource<T>>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Collection<T>>>,
{
    let mut items = Vec::new();
    let mut next = Some(first);

    while let Some(url) = next {
        let page = fetch(url).await?;
        debug!("Page with {} of {} items", page.data.len(), page.total_count);
        items.extend(page.data);
        next = page.pages.next_url;
    }

    Ok(items)
}

/// Map a non-success status onto an error.
fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
        _ => Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        }),
    }
}
