//! Derived values - what the dashboard views are rendered from.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use crate::subject::SubjectType;

/// Item counts for one bucket, split by subject type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    /// Every item in the bucket, whatever its type
    pub total: usize,

    /// Radicals
    pub radicals: usize,

    /// Kanji
    pub kanji: usize,

    /// Vocabulary
    pub vocabulary: usize,
}

impl BucketCounts {
    /// Count one item of the given type.
    ///
    /// Unknown types only count towards `total`.
    pub fn add(&mut self, subject_type: SubjectType) {
        self.total += 1;
        match subject_type {
            SubjectType::Radical => self.radicals += 1,
            SubjectType::Kanji => self.kanji += 1,
            SubjectType::Vocabulary => self.vocabulary += 1,
            SubjectType::Unknown => {}
        }
    }

    /// Sum of the typed counts.
    pub fn typed_total(&self) -> usize {
        self.radicals + self.kanji + self.vocabulary
    }
}

/// Passed over total for one subject type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedCount {
    /// Items with `passed_at` set
    pub passed: usize,

    /// All items
    pub total: usize,
}

/// Hours until level-up split into whole days and remaining hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    /// Whole days
    pub days: u32,

    /// Hours past the last whole day
    pub hours: u32,
}

impl TimeLeft {
    /// Split a number of hours.
    pub fn from_hours(hours: u32) -> Self {
        Self {
            days: hours / 24,
            hours: hours % 24,
        }
    }
}

/// Summary of the current level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEstimate {
    /// Level the estimate is for
    pub level: u32,

    /// Time spent on the level so far (or in total, once passed)
    #[serde(with = "duration_secs")]
    pub time_on_level: Duration,

    /// Fastest possible time to level-up, in hours
    pub hours_until_level_up: u32,

    /// Radicals passed on this level
    pub radicals: PassedCount,

    /// Kanji passed on this level
    pub kanji: PassedCount,

    /// Vocabulary passed on this level
    pub vocabulary: PassedCount,
}

impl LevelEstimate {
    /// Hours until level-up as days and hours.
    pub fn time_left(&self) -> TimeLeft {
        TimeLeft::from_hours(self.hours_until_level_up)
    }
}

/// Serde helper storing a `chrono::Duration` as whole seconds.
pub mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as seconds.
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    /// Deserialize from seconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Ok(Duration::seconds(secs))
    }
}
