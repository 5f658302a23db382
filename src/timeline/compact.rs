//! Collapse the per-day assignment list into contiguous date ranges.
//!
//! Two order-preserving stages, no re-sort:
//! 1. fold assignments into per-date lesson sets (adjacent grouping over the
//!    already-chronological list, lessons joined in priority order);
//! 2. merge runs of calendar-consecutive dates that carry an identical
//!    lesson set into one `start:end` range.
//!
//! A day whose lesson set differs from its neighbours breaks the run, so a
//! date shared by the tail of one lesson and the start of the next always
//! becomes its own row.

use crate::calendar::DATE_FMT;
use crate::timeline::Assignment;

use chrono::NaiveDate;

pub const DATE_RANGE_SEP: char = ':';

/// A contiguous run of scheduled dates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `2026-01-05:2026-01-07`, or just `2026-01-05` for a single day.
    pub fn token(&self) -> String {
        if self.start == self.end {
            self.start.format(DATE_FMT).to_string()
        } else {
            format!(
                "{}{}{}",
                self.start.format(DATE_FMT),
                DATE_RANGE_SEP,
                self.end.format(DATE_FMT)
            )
        }
    }
}

/// One output row: a date range and the lessons worked during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactedEntry {
    pub range: DateRange,
    pub lessons: String,
}

/// Compact the chronological assignment list into display rows.
///
/// `lesson_names[i]` is the display name of lesson index `i`. Entries come
/// out ordered by range start with no overlaps; running the compaction again
/// over its own expanded output is a no-op.
pub fn compact_assignments(assignments: &[Assignment], lesson_names: &[&str]) -> Vec<CompactedEntry> {
    let mut entries: Vec<CompactedEntry> = Vec::new();

    for (date, lessons) in lessons_by_date(assignments, lesson_names) {
        match entries.last_mut() {
            Some(prev)
                if (date - prev.range.end).num_days() == 1 && prev.lessons == lessons =>
            {
                prev.range.end = date;
            }
            _ => entries.push(CompactedEntry {
                range: DateRange { start: date, end: date },
                lessons,
            }),
        }
    }

    entries
}

/// Per-date lesson sets in chronological order. Within one date, lessons
/// keep their priority order and are joined with `", "`.
fn lessons_by_date(assignments: &[Assignment], lesson_names: &[&str]) -> Vec<(NaiveDate, String)> {
    let mut days: Vec<(NaiveDate, Vec<usize>)> = Vec::new();
    for a in assignments {
        match days.last_mut() {
            Some((date, lessons)) if *date == a.date => lessons.push(a.lesson),
            _ => days.push((a.date, vec![a.lesson])),
        }
    }

    days.into_iter()
        .map(|(date, lessons)| {
            let joined = lessons
                .iter()
                .map(|&i| lesson_names[i])
                .collect::<Vec<_>>()
                .join(", ");
            (date, joined)
        })
        .collect()
}
