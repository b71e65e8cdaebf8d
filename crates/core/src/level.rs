//! Level progression model.

use serde::{Deserialize, Serialize};
use crate::id::LevelProgressId;
use crate::Time;

/// The time window a user spent on one level.
///
/// A level reset leaves the old record in place with `abandoned_at` set, so
/// the same level can show up more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Unique identifier
    pub id: LevelProgressId,

    /// Level number, starting at 1
    pub level: u32,

    /// When the level was unlocked
    #[serde(default)]
    pub unlocked_at: Option<Time>,

    /// When the first lesson of the level was done
    #[serde(default)]
    pub started_at: Option<Time>,

    /// When the level was passed; absent while in progress
    #[serde(default)]
    pub passed_at: Option<Time>,

    /// When every item of the level reached burned
    #[serde(default)]
    pub completed_at: Option<Time>,

    /// When the level was abandoned by a reset
    #[serde(default)]
    pub abandoned_at: Option<Time>,
}

impl LevelProgress {
    /// Create a record for a level started at the given time.
    pub fn new(level: u32, started_at: Time) -> Self {
        Self {
            id: LevelProgressId(u64::from(level)),
            level,
            unlocked_at: Some(started_at),
            started_at: Some(started_at),
            passed_at: None,
            completed_at: None,
            abandoned_at: None,
        }
    }

    /// Mark as passed at the given time.
    pub fn passed(mut self, at: Time) -> Self {
        self.passed_at = Some(at);
        self
    }

    /// Whether the level has been passed.
    pub fn is_passed(&self) -> bool {
        self.passed_at.is_some()
    }

    /// Whether a reset abandoned this record.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned_at.is_some()
    }

    /// Earliest known start: `started_at`, else `unlocked_at`.
    pub fn start(&self) -> Option<Time> {
        self.started_at.or(self.unlocked_at)
    }
}
