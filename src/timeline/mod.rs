//! Greedy day-by-day allocation of lesson hours onto the commitment calendar.

pub mod compact;

use crate::calendar::CommitmentCalendar;
use crate::error::{PlanError, PlanResult};
use crate::lesson::Lesson;

use chrono::{Duration, NaiveDate};

/// Minimum slice of a day considered worth scheduling. Days whose remaining
/// capacity drops below this are skipped rather than fragmented into
/// micro-assignments.
pub const DEFAULT_MARGIN_HOURS: f64 = 0.25;

/// One (date, lesson) work-occurred marker.
///
/// Carries no hour amount: the compactor only needs to know which lessons
/// touched which dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub date: NaiveDate,
    pub lesson: usize,
}

/// Walk lessons and calendar days in lockstep, recording which dates each
/// lesson occupies.
///
/// Two cursors only ever move forward: the day cursor (current date plus its
/// unspent capacity) and the lesson cursor (current lesson plus its unmet
/// requirement). Every iteration either finishes a lesson or finishes a day,
/// so the loop runs in O(lessons + days) transitions.
///
/// Within a date, lessons appear in priority order; dates are non-decreasing
/// by construction.
pub fn allocate(
    hours_required: &[f64],
    calendar: &CommitmentCalendar,
    start: NaiveDate,
    margin: f64,
) -> PlanResult<Vec<Assignment>> {
    // A calendar where every weekday is below margin would spin forever on
    // the day-advance branch.
    let max = calendar.max_capacity();
    if !hours_required.is_empty() && (max <= 0.0 || max < margin) {
        return Err(PlanError::Config(format!(
            "no weekday offers at least {margin} commitment hours; the plan can never start"
        )));
    }

    let mut assignments = Vec::new();
    let mut lesson = 0usize;
    let mut lesson_remaining = match hours_required.first() {
        Some(h) => *h,
        None => return Ok(assignments),
    };
    let mut current_date = start;
    let mut day_remaining = calendar.capacity_on(current_date);

    while lesson < hours_required.len() {
        if day_remaining <= 0.0 || day_remaining < margin {
            // Day exhausted (or never usable): move to the next one.
            current_date += Duration::days(1);
            day_remaining = calendar.capacity_on(current_date);
        } else if day_remaining >= lesson_remaining {
            // The lesson finishes today; the day may still take more lessons.
            assignments.push(Assignment {
                date: current_date,
                lesson,
            });
            day_remaining -= lesson_remaining;
            lesson += 1;
            lesson_remaining = hours_required.get(lesson).copied().unwrap_or(0.0);
        } else {
            // The day is spent but the lesson continues tomorrow.
            assignments.push(Assignment {
                date: current_date,
                lesson,
            });
            lesson_remaining -= day_remaining;
            current_date += Duration::days(1);
            day_remaining = calendar.capacity_on(current_date);
        }
    }

    Ok(assignments)
}

/// Inclusive span of the whole plan in days (last date - first date + 1).
///
/// Always computed from the untruncated assignment list, even when the
/// caller only displays the first-week preview.
pub fn total_span_days(assignments: &[Assignment]) -> i64 {
    match (assignments.first(), assignments.last()) {
        (Some(first), Some(last)) => (last.date - first.date).num_days() + 1,
        _ => 0,
    }
}

/// Keep only assignments within seven days (inclusive) of the first one.
pub fn first_week(assignments: &[Assignment]) -> Vec<Assignment> {
    match assignments.first() {
        Some(first) => {
            let cutoff = first.date + Duration::days(7);
            assignments
                .iter()
                .copied()
                .filter(|a| a.date <= cutoff)
                .collect()
        }
        None => Vec::new(),
    }
}

/// The finished plan, ready for stamping and serialization.
#[derive(Debug, Clone)]
pub struct PlanData {
    pub entries: Vec<compact::CompactedEntry>,
    pub days_to_finish: i64,
}

/// Assemble the deliverable: normalize hours, allocate, optionally truncate
/// to the first week, then compact into date ranges.
pub fn build_plan_data(
    lessons: &[Lesson],
    expected_weekly_hours: f64,
    calendar: &CommitmentCalendar,
    start: NaiveDate,
    margin: f64,
    preview: bool,
) -> PlanResult<PlanData> {
    let hours: Vec<f64> = lessons
        .iter()
        .map(|l| l.time_required.to_hours(expected_weekly_hours))
        .collect();

    let assignments = allocate(&hours, calendar, start, margin)?;
    let days_to_finish = total_span_days(&assignments);

    let visible = if preview {
        first_week(&assignments)
    } else {
        assignments
    };

    let names: Vec<&str> = lessons.iter().map(|l| l.name.as_str()).collect();
    let entries = compact::compact_assignments(&visible, &names);

    Ok(PlanData {
        entries,
        days_to_finish,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DATE_FMT;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FMT).unwrap()
    }

    fn cal(values: &[f64]) -> CommitmentCalendar {
        CommitmentCalendar::from_values(values).unwrap()
    }

    // Monday.
    const START: &str = "2026-01-05";

    #[test]
    fn weekday_schedule_carries_a_lesson_across_days() {
        // A needs 10h, B needs 2h, 4h on weekdays only.
        let assignments =
            allocate(&[10.0, 2.0], &cal(&[4.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0]), date(START), DEFAULT_MARGIN_HOURS)
                .unwrap();

        assert_eq!(
            assignments,
            vec![
                Assignment { date: date("2026-01-05"), lesson: 0 }, // 4h
                Assignment { date: date("2026-01-06"), lesson: 0 }, // 4h
                Assignment { date: date("2026-01-07"), lesson: 0 }, // final 2h
                Assignment { date: date("2026-01-07"), lesson: 1 }, // B fits the rest
            ]
        );
    }

    #[test]
    fn zero_capacity_weekends_are_skipped() {
        // 24h of work at 4h per weekday: Mon-Fri, skip the weekend, finish
        // next Monday.
        let assignments =
            allocate(&[24.0], &cal(&[4.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0]), date(START), DEFAULT_MARGIN_HOURS)
                .unwrap();

        let dates: Vec<NaiveDate> = assignments.iter().map(|a| a.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2026-01-05"),
                date("2026-01-06"),
                date("2026-01-07"),
                date("2026-01-08"),
                date("2026-01-09"),
                date("2026-01-12"),
            ]
        );
    }

    #[test]
    fn several_short_lessons_share_a_day() {
        let assignments =
            allocate(&[1.0, 1.0, 1.0], &cal(&[4.0]), date(START), DEFAULT_MARGIN_HOURS).unwrap();
        assert_eq!(
            assignments,
            vec![
                Assignment { date: date(START), lesson: 0 },
                Assignment { date: date(START), lesson: 1 },
                Assignment { date: date(START), lesson: 2 },
            ]
        );
    }

    #[test]
    fn zero_hour_lesson_still_takes_one_slot() {
        let assignments =
            allocate(&[0.0, 2.0], &cal(&[4.0]), date(START), DEFAULT_MARGIN_HOURS).unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0], Assignment { date: date(START), lesson: 0 });
        assert_eq!(assignments[1], Assignment { date: date(START), lesson: 1 });
    }

    #[test]
    fn capacity_exactly_at_margin_is_usable() {
        let assignments =
            allocate(&[0.25], &cal(&[0.25]), date(START), 0.25).unwrap();
        assert_eq!(assignments, vec![Assignment { date: date(START), lesson: 0 }]);
    }

    #[test]
    fn capacity_just_below_margin_skips_the_day() {
        // Monday offers 0.2h < margin; work lands on Tuesday with no Monday
        // assignment at all.
        let assignments = allocate(
            &[1.0],
            &cal(&[0.2, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0]),
            date(START),
            0.25,
        )
        .unwrap();
        assert_eq!(assignments, vec![Assignment { date: date("2026-01-06"), lesson: 0 }]);
    }

    #[test]
    fn unusable_calendar_is_a_config_error() {
        let err = allocate(&[1.0], &cal(&[0.0]), date(START), 0.25).unwrap_err();
        assert!(matches!(err, PlanError::Config(_)), "got {err}");

        // All weekdays below margin is just as hopeless.
        let err = allocate(&[1.0], &cal(&[0.1]), date(START), 0.25).unwrap_err();
        assert!(matches!(err, PlanError::Config(_)), "got {err}");
    }

    #[test]
    fn no_lessons_yields_an_empty_timeline() {
        let assignments = allocate(&[], &cal(&[0.0]), date(START), 0.25).unwrap();
        assert!(assignments.is_empty());
        assert_eq!(total_span_days(&assignments), 0);
    }

    #[test]
    fn dates_are_monotonic_and_lessons_keep_priority_order() {
        let assignments = allocate(
            &[3.0, 5.0, 0.5, 2.0, 7.5],
            &cal(&[2.0, 3.0, 0.0, 4.0, 1.0, 0.0, 2.0]),
            date(START),
            DEFAULT_MARGIN_HOURS,
        )
        .unwrap();

        for pair in assignments.windows(2) {
            assert!(pair[0].date <= pair[1].date);
            if pair[0].date == pair[1].date {
                assert!(pair[0].lesson < pair[1].lesson);
            }
        }
        // Every lesson shows up, in first-touch order.
        let mut seen = Vec::new();
        for a in &assignments {
            if !seen.contains(&a.lesson) {
                seen.push(a.lesson);
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn hours_consumed_per_lesson_match_the_requirement() {
        // Replay day capacities over the assignment list and check that each
        // lesson (except possibly the last on its final day) consumes exactly
        // its requirement.
        let hours = [10.0, 2.0, 6.5];
        let calendar = cal(&[4.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0]);
        let assignments =
            allocate(&hours, &calendar, date(START), DEFAULT_MARGIN_HOURS).unwrap();

        let mut consumed = vec![0.0f64; hours.len()];
        let mut day: Option<(NaiveDate, f64)> = None;
        for a in &assignments {
            let (d, remaining) = match day {
                Some((d, rem)) if d == a.date => (d, rem),
                _ => (a.date, calendar.capacity_on(a.date)),
            };
            let want = hours[a.lesson] - consumed[a.lesson];
            let take = want.min(remaining);
            consumed[a.lesson] += take;
            day = Some((d, remaining - take));
        }

        for (i, h) in hours.iter().enumerate() {
            assert!(
                (consumed[i] - h).abs() < 1e-9,
                "lesson {i}: consumed {} of {h}",
                consumed[i]
            );
        }
    }

    #[test]
    fn first_week_truncates_but_span_does_not() {
        // 40h at 4h per weekday: Jan 5-9 then Jan 12-16.
        let calendar = cal(&[4.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0]);
        let assignments =
            allocate(&[40.0], &calendar, date(START), DEFAULT_MARGIN_HOURS).unwrap();

        assert_eq!(total_span_days(&assignments), 12);

        let week = first_week(&assignments);
        let last = week.last().unwrap().date;
        // Jan 12 is exactly seven days after Jan 5, so still included.
        assert_eq!(last, date("2026-01-12"));
        assert!(week.len() < assignments.len());
    }

    #[test]
    fn build_plan_data_reports_full_span_in_preview_mode() {
        let lessons = vec![
            Lesson::new("A", "40 hours").unwrap(),
        ];
        let calendar = cal(&[4.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0]);

        let full = build_plan_data(&lessons, 28.0, &calendar, date(START), DEFAULT_MARGIN_HOURS, false)
            .unwrap();
        let preview = build_plan_data(&lessons, 28.0, &calendar, date(START), DEFAULT_MARGIN_HOURS, true)
            .unwrap();

        assert_eq!(full.days_to_finish, 12);
        assert_eq!(preview.days_to_finish, 12);
        assert!(preview.entries.len() <= full.entries.len());
    }
}
