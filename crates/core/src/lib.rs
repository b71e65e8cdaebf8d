//! wkdash core data models.
//!
//! This crate defines the records fetched from WaniKani (assignments, level
//! progressions, the user profile) and the derived values the dashboard
//! renders from them.

#![warn(missing_docs)]

// Core identities
mod id;

// Learning items
mod subject;
mod srs;
mod assignment;

// Levels and the user
mod level;
mod user;

// Derived values
mod report;

// Re-exports
pub use id::*;

pub use subject::SubjectType;
pub use srs::{SrsStage, StageBucket};
pub use assignment::Assignment;
pub use level::LevelProgress;
pub use user::User;
pub use report::{BucketCounts, PassedCount, LevelEstimate, TimeLeft, duration_secs};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
