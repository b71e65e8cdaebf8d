//! Assignment model - one learning item's progress.

use serde::{Deserialize, Serialize};
use crate::id::{AssignmentId, SubjectId};
use crate::srs::SrsStage;
use crate::subject::SubjectType;
use crate::Time;

/// An assignment tracks where the user stands on a single subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,

    /// Subject this assignment is for
    pub subject_id: SubjectId,

    /// Kind of subject
    pub subject_type: SubjectType,

    /// Current SRS stage
    pub srs_stage: SrsStage,

    /// When the lesson was done
    #[serde(default)]
    pub started_at: Option<Time>,

    /// When the item first reached guru
    #[serde(default)]
    pub passed_at: Option<Time>,

    /// When the item was burned
    #[serde(default)]
    pub burned_at: Option<Time>,

    /// When the next review becomes available
    #[serde(default)]
    pub available_at: Option<Time>,

    /// Hidden subjects are no longer part of the curriculum
    #[serde(default)]
    pub hidden: bool,
}

impl Assignment {
    /// Create an assignment at the given stage with no timestamps.
    pub fn new(
        id: impl Into<AssignmentId>,
        subject_type: SubjectType,
        srs_stage: impl Into<SrsStage>,
    ) -> Self {
        let id = id.into();
        Self {
            id,
            subject_id: SubjectId(id.0),
            subject_type,
            srs_stage: srs_stage.into(),
            started_at: None,
            passed_at: None,
            burned_at: None,
            available_at: None,
            hidden: false,
        }
    }

    /// Mark as passed at the given time.
    pub fn passed(mut self, at: Time) -> Self {
        self.passed_at = Some(at);
        self
    }

    /// Whether the item has passed the guru threshold at least once.
    pub fn is_passed(&self) -> bool {
        self.passed_at.is_some()
    }
}
