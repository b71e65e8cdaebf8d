//! Progress tracking service.
//!
//! The tracker is the only async part of this crate: it fetches an immutable
//! snapshot from a [`DataSource`], and the views are computed from the
//! snapshot synchronously.

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use wkdash_api::{ApiError, DataSource};
use wkdash_core::{Assignment, LevelEstimate, LevelProgress, Time, User};
use crate::categorizer::{categorize, StageCounts};
use crate::estimator::level_estimate;
use crate::history::{level_history, LevelDuration};

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur while building a view.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Fetching data failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Data needed for the current-level view.
#[derive(Debug, Clone)]
pub struct LevelSnapshot {
    /// When the snapshot was taken
    pub taken_at: Time,

    /// User profile
    pub user: User,

    /// All level progressions
    pub levels: Vec<LevelProgress>,

    /// Assignments of the user's current level
    pub assignments: Vec<Assignment>,
}

impl LevelSnapshot {
    /// Current-level summary.
    pub fn estimate(&self) -> LevelEstimate {
        level_estimate(self.user.level, &self.levels, &self.assignments, self.taken_at)
    }

    /// Time spent on every level.
    pub fn history(&self) -> Vec<LevelDuration> {
        level_history(&self.levels, self.taken_at)
    }
}

/// Data needed for the full dashboard.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Current-level data
    pub level: LevelSnapshot,

    /// Assignments across every level
    pub all_assignments: Vec<Assignment>,
}

impl Snapshot {
    /// Compute every view.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            username: self.level.user.username.clone(),
            counts: categorize(&self.all_assignments),
            level: self.level.estimate(),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Whose dashboard
    pub username: String,

    /// Item counts by bucket
    pub counts: StageCounts,

    /// Current level summary
    pub level: LevelEstimate,
}

/// Fetches snapshots from a data source.
pub struct ProgressTracker<D: DataSource> {
    source: D,
}

impl<D: DataSource> ProgressTracker<D> {
    /// Create a new progress tracker.
    pub fn new(source: D) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Fetch the user, level progressions and current-level assignments.
    pub async fn level_snapshot(&self) -> Result<LevelSnapshot> {
        let user = self.source.user().await?;
        let (levels, assignments) = tokio::try_join!(
            self.source.level_progressions(),
            self.source.assignments(Some(user.level)),
        )?;

        info!(
            "Snapshot for {} at level {}: {} levels, {} assignments",
            user.username,
            user.level,
            levels.len(),
            assignments.len()
        );

        Ok(LevelSnapshot {
            taken_at: Utc::now(),
            user,
            levels,
            assignments,
        })
    }

    /// Fetch everything the dashboard needs.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (level, all_assignments) =
            tokio::try_join!(self.level_snapshot(), self.all_assignments())?;
        Ok(Snapshot { level, all_assignments })
    }

    /// Item counts across every level.
    pub async fn counts(&self) -> Result<StageCounts> {
        let assignments = self.all_assignments().await?;
        Ok(categorize(&assignments))
    }

    /// Time spent on every level.
    pub async fn history(&self) -> Result<Vec<LevelDuration>> {
        let levels = self.source.level_progressions().await?;
        Ok(level_history(&levels, Utc::now()))
    }

    async fn all_assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.source.assignments(None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use wkdash_core::{StageBucket, SubjectType};

    struct FixedSource {
        user: User,
        levels: Vec<LevelProgress>,
        assignments: Vec<(u32, Assignment)>,
    }

    #[async_trait]
    impl DataSource for FixedSource {
        async fn user(&self) -> wkdash_api::Result<User> {
            Ok(self.user.clone())
        }

        async fn assignments(&self, level: Option<u32>) -> wkdash_api::Result<Vec<Assignment>> {
            Ok(self
                .assignments
                .iter()
                .filter(|(l, _)| level.map_or(true, |level| *l == level))
                .map(|(_, a)| a.clone())
                .collect())
        }

        async fn level_progressions(&self) -> wkdash_api::Result<Vec<LevelProgress>> {
            Ok(self.levels.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn user(&self) -> wkdash_api::Result<User> {
            Err(ApiError::Unauthorized)
        }

        async fn assignments(&self, _level: Option<u32>) -> wkdash_api::Result<Vec<Assignment>> {
            Err(ApiError::Unauthorized)
        }

        async fn level_progressions(&self) -> wkdash_api::Result<Vec<LevelProgress>> {
            Err(ApiError::Unauthorized)
        }
    }

    fn fixture() -> FixedSource {
        let now = Utc::now();
        let passed = now - Duration::days(3);
        FixedSource {
            user: User::new("koichi", 2),
            levels: vec![
                LevelProgress::new(1, now - Duration::days(10)).passed(passed),
                LevelProgress::new(2, passed),
            ],
            assignments: vec![
                (1, Assignment::new(1, SubjectType::Radical, 9).passed(passed)),
                (1, Assignment::new(2, SubjectType::Kanji, 8).passed(passed)),
                (2, Assignment::new(3, SubjectType::Radical, 3)),
                (2, Assignment::new(4, SubjectType::Kanji, 0)),
                (2, Assignment::new(5, SubjectType::Vocabulary, 0)),
            ],
        }
    }

    #[tokio::test]
    async fn test_dashboard_from_snapshot() {
        let tracker = ProgressTracker::new(fixture());
        let snapshot = tracker.snapshot().await.unwrap();

        assert_eq!(snapshot.all_assignments.len(), 5);
        assert_eq!(snapshot.level.assignments.len(), 3);

        let dashboard = snapshot.dashboard();
        assert_eq!(dashboard.username, "koichi");
        assert_eq!(dashboard.counts.total(), 5);
        assert_eq!(dashboard.counts.get(StageBucket::Burned).radicals, 1);
        assert_eq!(dashboard.counts.get(StageBucket::Available).total, 2);

        assert_eq!(dashboard.level.level, 2);
        assert_eq!(dashboard.level.hours_until_level_up, 156);
        assert_eq!(dashboard.level.radicals.total, 1);
        assert!(dashboard.level.time_on_level >= Duration::days(3));
    }

    #[tokio::test]
    async fn test_counts_and_history() {
        let tracker = ProgressTracker::new(fixture());

        let counts = tracker.counts().await.unwrap();
        assert_eq!(counts.get(StageBucket::Enlightened).kanji, 1);

        let history = tracker.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].duration, Duration::days(7));
        assert!(!history[1].passed);
    }

    #[tokio::test]
    async fn test_source_errors_propagate() {
        let tracker = ProgressTracker::new(FailingSource);
        let err = tracker.level_snapshot().await.unwrap_err();
        assert!(matches!(err, ProgressError::Api(ApiError::Unauthorized)));
    }
}
