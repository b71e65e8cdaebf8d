//! Data source trait.

use async_trait::async_trait;
use wkdash_core::{Assignment, LevelProgress, User};
use crate::Result;

/// The three read-only queries the dashboard is built from.
///
/// Implementations are either the live API or something wrapping it; the
/// progress crate never knows which.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Current user profile.
    async fn user(&self) -> Result<User>;

    /// Assignments, optionally restricted to one level.
    async fn assignments(&self, level: Option<u32>) -> Result<Vec<Assignment>>;

    /// Level progressions, ordered by level ascending.
    async fn level_progressions(&self) -> Result<Vec<LevelProgress>>;
}

#[async_trait]
impl<D: DataSource + ?Sized> DataSource for std::sync::Arc<D> {
    async fn user(&self) -> Result<User> {
        (**self).user().await
    }

    async fn assignments(&self, level: Option<u32>) -> Result<Vec<Assignment>> {
        (**self).assignments(level).await
    }

    async fn level_progressions(&self) -> Result<Vec<LevelProgress>> {
        (**self).level_progressions().await
    }
}
