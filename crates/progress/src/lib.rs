//! Progress views.
//!
//! Item counts by SRS bucket, the current-level estimate and the level
//! history. Everything except [`tracker`] is pure computation over data
//! that has already been fetched.

#![warn(missing_docs)]

pub mod categorizer;
pub mod estimator;
pub mod history;
pub mod tracker;

pub use categorizer::{categorize, StageCounts};
pub use estimator::{
    estimate_level_up, level_estimate, time_on_level, GateTable, LevelUpEstimator,
};
pub use history::{average_passed_duration, level_history, LevelDuration};
pub use tracker::{Dashboard, LevelSnapshot, ProgressError, ProgressTracker, Result, Snapshot};
