//! Level-up time estimation.
//!
//! Passing a level needs most of its kanji at guru, and kanji only unlock
//! once their radicals reach guru. The estimate is the fastest possible path:
//! every review done the moment it comes up, with no wrong answers. The least
//! advanced radical (or, once radicals are through, the least advanced kanji)
//! sets the pace.

use chrono::Duration;
use wkdash_core::{
    Assignment, LevelEstimate, LevelProgress, PassedCount, SrsStage, SubjectType, Time,
};

/// Hours left until guru, by SRS stage 0 to 4.
///
/// The values are taken from WaniKani's review-interval schedule and are
/// treated as fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTable {
    hours: [u32; 5],
}

impl GateTable {
    /// Radicals: guru, unlock the kanji, then the kanji's own wait.
    pub const RADICAL: GateTable = GateTable { hours: [168, 168, 164, 156, 132] };

    /// Kanji: remaining wait until guru.
    pub const KANJI: GateTable = GateTable { hours: [84, 84, 80, 72, 48] };

    /// Hours for a stage, or `None` when the stage no longer gates.
    pub fn lookup(&self, stage: SrsStage) -> Option<u32> {
        self.hours.get(usize::from(stage.get())).copied()
    }
}

/// Level-up time estimator.
#[derive(Debug, Clone, Copy)]
pub struct LevelUpEstimator {
    radical: GateTable,
    kanji: GateTable,
}

impl LevelUpEstimator {
    /// Estimator with custom tables.
    pub fn new(radical: GateTable, kanji: GateTable) -> Self {
        Self { radical, kanji }
    }

    /// Hours until the level can be passed.
    ///
    /// Pass the full radical and kanji sets of the level; items that already
    /// passed are filtered out here.
    pub fn estimate(&self, radicals: &[Assignment], kanji: &[Assignment]) -> u32 {
        lowest_unpassed_stage(radicals)
            .and_then(|stage| self.radical.lookup(stage))
            .or_else(|| lowest_unpassed_stage(kanji).and_then(|stage| self.kanji.lookup(stage)))
            .unwrap_or(0)
    }
}

impl Default for LevelUpEstimator {
    fn default() -> Self {
        Self::new(GateTable::RADICAL, GateTable::KANJI)
    }
}

/// Hours until level-up with the standard tables.
pub fn estimate_level_up(radicals: &[Assignment], kanji: &[Assignment]) -> u32 {
    LevelUpEstimator::default().estimate(radicals, kanji)
}

fn lowest_unpassed_stage(items: &[Assignment]) -> Option<SrsStage> {
    items
        .iter()
        .filter(|a| !a.is_passed())
        .map(|a| a.srs_stage)
        .min()
}

/// Record for a level. After a reset the newest non-abandoned record wins.
pub(crate) fn find_level(levels: &[LevelProgress], level: u32) -> Option<&LevelProgress> {
    let matching: Vec<&LevelProgress> = levels.iter().filter(|l| l.level == level).collect();
    matching
        .iter()
        .rev()
        .find(|l| !l.is_abandoned())
        .or(matching.last())
        .copied()
}

/// Time spent on `current_level`.
///
/// The level starts when the previous one was passed (or, on level 1, when
/// it was started) and ends when it is passed, or `now` while in progress.
pub fn time_on_level(levels: &[LevelProgress], current_level: u32, now: Time) -> Duration {
    let Some(current) = find_level(levels, current_level) else {
        return Duration::zero();
    };

    let previous_passed = if current_level > 1 {
        find_level(levels, current_level - 1).and_then(|l| l.passed_at)
    } else {
        None
    };

    let Some(start) = previous_passed.or_else(|| current.start()) else {
        return Duration::zero();
    };
    let end = current.passed_at.unwrap_or(now);

    (end - start).max(Duration::zero())
}

/// Summary of the current level from its assignments.
pub fn level_estimate(
    current_level: u32,
    levels: &[LevelProgress],
    assignments: &[Assignment],
    now: Time,
) -> LevelEstimate {
    let of_type = |t: SubjectType| -> Vec<Assignment> {
        assignments.iter().filter(|a| a.subject_type == t).cloned().collect()
    };
    let radicals = of_type(SubjectType::Radical);
    let kanji = of_type(SubjectType::Kanji);
    let vocabulary = of_type(SubjectType::Vocabulary);

    LevelEstimate {
        level: current_level,
        time_on_level: time_on_level(levels, current_level, now),
        hours_until_level_up: estimate_level_up(&radicals, &kanji),
        radicals: passed_count(&radicals),
        kanji: passed_count(&kanji),
        vocabulary: passed_count(&vocabulary),
    }
}

fn passed_count(items: &[Assignment]) -> PassedCount {
    PassedCount {
        passed: items.iter().filter(|a| a.is_passed()).count(),
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(day: u32, hour: u32) -> Time {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn radical(id: u64, stage: u8) -> Assignment {
        Assignment::new(id, SubjectType::Radical, stage)
    }

    fn kanji(id: u64, stage: u8) -> Assignment {
        Assignment::new(id, SubjectType::Kanji, stage)
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(estimate_level_up(&[], &[]), 0);
    }

    #[test]
    fn test_radical_gate_table() {
        let expected = [(0, 168), (1, 168), (2, 164), (3, 156), (4, 132)];
        for (stage, hours) in expected {
            assert_eq!(estimate_level_up(&[radical(1, stage)], &[]), hours, "stage {}", stage);
        }
    }

    #[test]
    fn test_kanji_gate_table() {
        let expected = [(0, 84), (1, 84), (2, 80), (3, 72), (4, 48)];
        for (stage, hours) in expected {
            assert_eq!(estimate_level_up(&[], &[kanji(1, stage)]), hours, "stage {}", stage);
        }
    }

    #[test]
    fn test_lowest_radical_gates() {
        let radicals = vec![radical(1, 4), radical(2, 2), radical(3, 3), radical(4, 1).passed(t(1, 0))];
        let kanji = vec![kanji(5, 5).passed(t(2, 0))];
        assert_eq!(estimate_level_up(&radicals, &kanji), 164);
    }

    #[test]
    fn test_passed_radicals_fall_through_to_kanji() {
        let radicals = vec![radical(1, 5).passed(t(1, 0)), radical(2, 6).passed(t(1, 0))];
        let kanji = vec![kanji(3, 3), kanji(4, 4), kanji(5, 1).passed(t(3, 0))];
        assert_eq!(estimate_level_up(&radicals, &kanji), 72);
    }

    #[test]
    fn test_unpassed_radical_past_gate_falls_through() {
        // Past stage 4 a radical no longer gates, passed or not.
        let radicals = vec![radical(1, 5)];
        let kanji = vec![kanji(2, 2)];
        assert_eq!(estimate_level_up(&radicals, &kanji), 80);
    }

    #[test]
    fn test_everything_passed_is_zero() {
        let radicals = vec![radical(1, 5).passed(t(1, 0))];
        let kanji = vec![kanji(2, 6).passed(t(2, 0))];
        assert_eq!(estimate_level_up(&radicals, &kanji), 0);
    }

    #[test]
    fn test_gate_lookup_misses_past_four() {
        assert_eq!(GateTable::RADICAL.lookup(SrsStage(5)), None);
        assert_eq!(GateTable::KANJI.lookup(SrsStage(9)), None);
    }

    #[test]
    fn test_time_on_level_uses_previous_pass() {
        let levels = vec![
            LevelProgress::new(1, t(1, 0)).passed(t(5, 0)),
            LevelProgress::new(2, t(6, 0)),
        ];

        assert_eq!(time_on_level(&levels, 2, t(10, 0)), Duration::days(5));
    }

    #[test]
    fn test_time_on_first_level_uses_own_start() {
        let levels = vec![LevelProgress::new(1, t(1, 12))];
        assert_eq!(time_on_level(&levels, 1, t(2, 0)), Duration::hours(12));
    }

    #[test]
    fn test_time_on_passed_level_ends_at_pass() {
        let levels = vec![
            LevelProgress::new(1, t(1, 0)).passed(t(3, 0)),
            LevelProgress::new(2, t(3, 0)).passed(t(10, 0)),
        ];
        assert_eq!(time_on_level(&levels, 2, t(20, 0)), Duration::days(7));
    }

    #[test]
    fn test_time_on_level_missing_record_is_zero() {
        let levels = vec![LevelProgress::new(1, t(1, 0))];
        assert_eq!(time_on_level(&levels, 3, t(2, 0)), Duration::zero());
    }

    #[test]
    fn test_time_on_level_falls_back_to_own_start() {
        let levels = vec![
            LevelProgress::new(1, t(1, 0)),
            LevelProgress::new(2, t(4, 0)),
        ];
        assert_eq!(time_on_level(&levels, 2, t(5, 0)), Duration::days(1));
    }

    #[test]
    fn test_abandoned_record_is_skipped() {
        let mut abandoned = LevelProgress::new(2, t(2, 0));
        abandoned.abandoned_at = Some(t(3, 0));
        let levels = vec![
            LevelProgress::new(1, t(1, 0)).passed(t(2, 0)),
            abandoned,
            LevelProgress::new(2, t(8, 0)),
        ];

        assert_eq!(find_level(&levels, 2).unwrap().started_at, Some(t(8, 0)));
    }

    #[test]
    fn test_level_estimate() {
        let levels = vec![
            LevelProgress::new(1, t(1, 0)).passed(t(5, 0)),
            LevelProgress::new(2, t(5, 0)),
        ];
        let assignments = vec![
            radical(1, 5).passed(t(6, 0)),
            radical(2, 6).passed(t(6, 0)),
            kanji(3, 2),
            kanji(4, 5).passed(t(8, 0)),
            Assignment::new(5, SubjectType::Vocabulary, 1),
            Assignment::new(6, SubjectType::Unknown, 1),
        ];

        let estimate = level_estimate(2, &levels, &assignments, t(9, 0));
        assert_eq!(estimate.level, 2);
        assert_eq!(estimate.time_on_level, Duration::days(4));
        assert_eq!(estimate.hours_until_level_up, 80);
        assert_eq!(estimate.radicals, PassedCount { passed: 2, total: 2 });
        assert_eq!(estimate.kanji, PassedCount { passed: 1, total: 2 });
        assert_eq!(estimate.vocabulary, PassedCount { passed: 0, total: 1 });
        assert_eq!(estimate.time_left().days, 3);
        assert_eq!(estimate.time_left().hours, 8);
    }
}
