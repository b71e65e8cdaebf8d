//! Item counts by SRS bucket.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use wkdash_core::{Assignment, BucketCounts, StageBucket};

/// Counts for every bucket. All six buckets are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCounts {
    buckets: BTreeMap<StageBucket, BucketCounts>,
}

impl StageCounts {
    /// All buckets at zero.
    pub fn new() -> Self {
        Self {
            buckets: StageBucket::ALL
                .into_iter()
                .map(|bucket| (bucket, BucketCounts::default()))
                .collect(),
        }
    }

    /// Counts for one bucket.
    pub fn get(&self, bucket: StageBucket) -> BucketCounts {
        self.buckets.get(&bucket).copied().unwrap_or_default()
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StageBucket, BucketCounts)> + '_ {
        self.buckets.iter().map(|(bucket, counts)| (*bucket, *counts))
    }

    /// Items across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.values().map(|c| c.total).sum()
    }

    fn add(&mut self, assignment: &Assignment) {
        self.buckets
            .entry(assignment.srs_stage.bucket())
            .or_default()
            .add(assignment.subject_type);
    }
}

impl Default for StageCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// Group assignments by bucket and subject type.
pub fn categorize(assignments: &[Assignment]) -> StageCounts {
    let mut counts = StageCounts::new();
    for assignment in assignments {
        counts.add(assignment);
    }
    counts
}
