//! Plain-text rendering of the views.

use std::fmt::Write;
use chrono::Duration;
use wkdash_core::{LevelEstimate, PassedCount};
use wkdash_progress::{average_passed_duration, Dashboard, LevelDuration, StageCounts};

/// Item counts table.
pub fn counts(counts: &StageCounts) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>6} {:>9} {:>6} {:>11}",
        "Stage", "Total", "Radicals", "Kanji", "Vocabulary"
    );
    for (bucket, c) in counts.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>9} {:>6} {:>11}",
            bucket.label(),
            c.total,
            c.radicals,
            c.kanji,
            c.vocabulary
        );
    }
    out
}

/// Current level summary.
pub fn level(estimate: &LevelEstimate) -> String {
    let mut out = String::new();
    let left = estimate.time_left();

    let _ = writeln!(out, "Level {}", estimate.level);
    if left.days > 0 {
        let _ = writeln!(out, "  {} days {} hours until level-up", left.days, left.hours);
    } else {
        let _ = writeln!(out, "  {} hours until level-up", left.hours);
    }
    let _ = writeln!(out, "  (fastest case: every review done on time, no wrong answers)");
    let _ = writeln!(out, "  Time on level: {}", format_duration(estimate.time_on_level));
    let _ = writeln!(out, "  Radicals    {}", fraction(estimate.radicals));
    let _ = writeln!(out, "  Kanji       {}", fraction(estimate.kanji));
    let _ = writeln!(out, "  Vocabulary  {}", fraction(estimate.vocabulary));
    out
}

/// Level history table.
pub fn history(history: &[LevelDuration]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<10}", "Level", "Time");
    for entry in history {
        let marker = if entry.passed { "" } else { "  (in progress)" };
        let _ = writeln!(
            out,
            "{:>5}  {:<10}{}",
            entry.level,
            format_duration(entry.duration),
            marker
        );
    }
    if let Some(average) = average_passed_duration(history) {
        let _ = writeln!(out, "Average per passed level: {}", format_duration(average));
    }
    out
}

/// Counts followed by the level summary.
pub fn dashboard(dashboard: &Dashboard) -> String {
    format!(
        "{}\n{}\n{}",
        dashboard.username,
        counts(&dashboard.counts),
        level(&dashboard.level)
    )
}

fn fraction(count: PassedCount) -> String {
    format!("{}/{}", count.passed, count.total)
}

/// `3d 4h`
fn format_duration(d: Duration) -> String {
    let hours = d.num_hours().max(0);
    format!("{}d {}h", hours / 24, hours % 24)
}
