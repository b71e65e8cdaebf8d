//! WaniKani v2 response envelopes and record payloads.
//!
//! Every response wraps its payload in `{ "object": ..., "data": ... }`.
//! Collections add paging; resources inside a collection carry the record id
//! next to `data`.

use serde::Deserialize;
use wkdash_core::{
    Assignment, AssignmentId, LevelProgress, LevelProgressId, SrsStage, SubjectId, SubjectType,
    Time, User,
};
use crate::{ApiError, Result};

/// A single resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    /// Record id; the user resource has none
    #[serde(default)]
    pub id: Option<u64>,

    /// Object type, e.g. `assignment`
    pub object: String,

    /// Payload
    pub data: T,
}

impl<T> Resource<T> {
    fn require_id(&self) -> Result<u64> {
        self.id
            .ok_or_else(|| ApiError::Malformed(format!("{} without id", self.object)))
    }
}

/// Paging links of a collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pages {
    /// Next page, absent on the last page
    #[serde(default)]
    pub next_url: Option<String>,

    /// Page size
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// A page of resources.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    /// Always `collection`
    pub object: String,

    /// Records across all pages
    #[serde(default)]
    pub total_count: usize,

    /// Paging links
    #[serde(default)]
    pub pages: Pages,

    /// Records on this page
    pub data: Vec<Resource<T>>,
}

/// Assignment payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentData {
    /// Subject id
    pub subject_id: u64,
    /// Subject type
    pub subject_type: SubjectType,
    /// SRS stage
    pub srs_stage: u8,
    /// Lesson done
    #[serde(default)]
    pub started_at: Option<Time>,
    /// Reached guru
    #[serde(default)]
    pub passed_at: Option<Time>,
    /// Burned
    #[serde(default)]
    pub burned_at: Option<Time>,
    /// Next review
    #[serde(default)]
    pub available_at: Option<Time>,
    /// Removed from the curriculum
    #[serde(default)]
    pub hidden: bool,
}

/// Level progression payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelProgressionData {
    /// Level number
    pub level: u32,
    /// Unlocked
    #[serde(default)]
    pub unlocked_at: Option<Time>,
    /// Started
    #[serde(default)]
    pub started_at: Option<Time>,
    /// Passed
    #[serde(default)]
    pub passed_at: Option<Time>,
    /// Completed
    #[serde(default)]
    pub completed_at: Option<Time>,
    /// Abandoned by a reset
    #[serde(default)]
    pub abandoned_at: Option<Time>,
}

/// User payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    /// Display name
    pub username: String,
    /// Current level
    pub level: u32,
    /// Profile page
    #[serde(default)]
    pub profile_url: Option<String>,
    /// Sign-up time
    #[serde(default)]
    pub started_at: Option<Time>,
    /// Subscription details
    #[serde(default)]
    pub subscription: Option<SubscriptionData>,
}

/// Subscription payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionData {
    /// Highest level the subscription allows
    #[serde(default)]
    pub max_level_granted: Option<u32>,
}

impl TryFrom<Resource<AssignmentData>> for Assignment {
    type Error = ApiError;

    fn try_from(resource: Resource<AssignmentData>) -> Result<Self> {
        let id = resource.require_id()?;
        let data = resource.data;
        Ok(Assignment {
            id: AssignmentId(id),
            subject_id: SubjectId(data.subject_id),
            subject_type: data.subject_type,
            srs_stage: SrsStage(data.srs_stage),
            started_at: data.started_at,
            passed_at: data.passed_at,
            burned_at: data.burned_at,
            available_at: data.available_at,
            hidden: data.hidden,
        })
    }
}

impl TryFrom<Resource<LevelProgressionData>> for LevelProgress {
    type Error = ApiError;

    fn try_from(resource: Resource<LevelProgressionData>) -> Result<Self> {
        let id = resource.require_id()?;
        let data = resource.data;
        Ok(LevelProgress {
            id: LevelProgressId(id),
            level: data.level,
            unlocked_at: data.unlocked_at,
            started_at: data.started_at,
            passed_at: data.passed_at,
            completed_at: data.completed_at,
            abandoned_at: data.abandoned_at,
        })
    }
}

impl From<Resource<UserData>> for User {
    fn from(resource: Resource<UserData>) -> Self {
        let data = resource.data;
        User {
            username: data.username,
            level: data.level,
            max_level_granted: data.subscription.and_then(|s| s.max_level_granted),
            started_at: data.started_at,
            profile_url: data.profile_url,
        }
    }
}
