//! SRS stages and the display buckets they fall into.

use serde::{Deserialize, Serialize};

/// Position of an item in the spaced-repetition schedule.
///
/// Stage 0 means the lesson is unlocked but not done yet; 9 is burned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SrsStage(pub u8);

impl SrsStage {
    /// Lesson available, not started
    pub const INITIATE: SrsStage = SrsStage(0);

    /// First stage at which an item counts as learned
    pub const GURU: SrsStage = SrsStage(5);

    /// Final stage
    pub const BURNED: SrsStage = SrsStage(9);

    /// Raw stage number
    pub fn get(self) -> u8 {
        self.0
    }

    /// Bucket this stage is displayed in.
    pub fn bucket(self) -> StageBucket {
        StageBucket::of(self)
    }
}

impl From<u8> for SrsStage {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SrsStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Proficiency bucket used by the item counts view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageBucket {
    /// Stage 0
    Available,
    /// Stages 1 to 4
    Apprentice,
    /// Stages 5 and 6
    Guru,
    /// Stage 7
    Master,
    /// Stage 8
    Enlightened,
    /// Stage 9 and above
    Burned,
}

impl StageBucket {
    /// All buckets in display order.
    pub const ALL: [StageBucket; 6] = [
        StageBucket::Available,
        StageBucket::Apprentice,
        StageBucket::Guru,
        StageBucket::Master,
        StageBucket::Enlightened,
        StageBucket::Burned,
    ];

    /// Bucket for a stage. Upper bounds are exclusive.
    pub fn of(stage: SrsStage) -> StageBucket {
        match stage.0 {
            0 => StageBucket::Available,
            1..=4 => StageBucket::Apprentice,
            5..=6 => StageBucket::Guru,
            7 => StageBucket::Master,
            8 => StageBucket::Enlightened,
            _ => StageBucket::Burned,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StageBucket::Available => "Available",
            StageBucket::Apprentice => "Apprentice",
            StageBucket::Guru => "Guru",
            StageBucket::Master => "Master",
            StageBucket::Enlightened => "Enlightened",
            StageBucket::Burned => "Burned",
        }
    }
}

impl std::fmt::Display for StageBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let expected = [
            (0, StageBucket::Available),
            (1, StageBucket::Apprentice),
            (4, StageBucket::Apprentice),
            (5, StageBucket::Guru),
            (6, StageBucket::Guru),
            (7, StageBucket::Master),
            (8, StageBucket::Enlightened),
            (9, StageBucket::Burned),
        ];

        for (stage, bucket) in expected {
            assert_eq!(StageBucket::of(SrsStage(stage)), bucket, "stage {}", stage);
        }
    }

    #[test]
    fn test_stages_past_burned_stay_burned() {
        assert_eq!(SrsStage(12).bucket(), StageBucket::Burned);
    }

    #[test]
    fn test_all_is_in_display_order() {
        let mut sorted = StageBucket::ALL;
        sorted.sort();
        assert_eq!(sorted, StageBucket::ALL);
    }
}
