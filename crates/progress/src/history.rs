//! Time spent on each level.

use std::collections::BTreeSet;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use wkdash_core::{duration_secs, LevelProgress, Time};
use crate::estimator::{find_level, time_on_level};

/// Time spent on one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDuration {
    /// Level number
    pub level: u32,

    /// Time on the level, up to now if still in progress
    #[serde(with = "duration_secs")]
    pub duration: Duration,

    /// Whether the level has been passed
    pub passed: bool,
}

/// One entry per level, ascending. Abandoned records are superseded by the
/// record that replaced them.
pub fn level_history(levels: &[LevelProgress], now: Time) -> Vec<LevelDuration> {
    let numbers: BTreeSet<u32> = levels.iter().map(|l| l.level).collect();

    numbers
        .into_iter()
        .filter_map(|level| {
            let record = find_level(levels, level)?;
            if record.is_abandoned() {
                return None;
            }
            Some(LevelDuration {
                level,
                duration: time_on_level(levels, level, now),
                passed: record.is_passed(),
            })
        })
        .collect()
}

/// Mean time over passed levels, `None` when no level is passed.
pub fn average_passed_duration(history: &[LevelDuration]) -> Option<Duration> {
    let passed: Vec<_> = history.iter().filter(|l| l.passed).collect();
    if passed.is_empty() {
        return None;
    }
    let total: i64 = passed.iter().map(|l| l.duration.num_seconds()).sum();
    Some(Duration::seconds(total / passed.len() as i64))
}
