//! Weekday commitment calendar and start-date parsing.
//!
//! Weekday indexing follows chrono's days-from-Monday convention:
//! 0 = Monday ... 6 = Sunday.

use crate::error::{PlanError, PlanResult};

use chrono::{Datelike, FixedOffset, NaiveDate};
use regex::Regex;

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIMEZONE_SEP: char = ':';

const OFFSET_RE: &str = r"^([+-])(\d{2}):(\d{2})$";

/// Hours the learner can commit on each weekday, Monday first.
///
/// A capacity of zero means no commitment that day; negative capacities are
/// rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentCalendar {
    hours: [f64; 7],
}

impl CommitmentCalendar {
    /// Build from either a single daily value (applied uniformly to all
    /// seven weekdays) or exactly seven per-weekday values.
    pub fn from_values(values: &[f64]) -> PlanResult<Self> {
        let hours: [f64; 7] = match *values {
            [single] => [single; 7],
            [mon, tue, wed, thu, fri, sat, sun] => [mon, tue, wed, thu, fri, sat, sun],
            _ => {
                return Err(PlanError::Config(format!(
                    "daily commitment must be a single number or one per weekday, got {} values",
                    values.len()
                )));
            }
        };

        if let Some(bad) = hours.iter().find(|h| **h < 0.0) {
            return Err(PlanError::Config(format!(
                "weekday commitment cannot be negative: {bad}"
            )));
        }

        Ok(Self { hours })
    }

    /// Commitment hours for the weekday `date` falls on.
    pub fn capacity_on(&self, date: NaiveDate) -> f64 {
        self.hours[date.weekday().num_days_from_monday() as usize]
    }

    /// Largest single-day capacity, used to reject calendars no plan fits.
    pub fn max_capacity(&self) -> f64 {
        self.hours.iter().copied().fold(0.0, f64::max)
    }
}

/// Classroom start date: a calendar date plus an optional UTC offset that is
/// recorded at parse time but takes no part in day arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartDate {
    pub date: NaiveDate,
    pub offset: Option<FixedOffset>,
}

/// Parse `YYYY-MM-DD` with an optional `:±HH:MM` offset suffix.
pub fn parse_start_date(s: &str) -> PlanResult<StartDate> {
    let s = s.trim();
    let (date_part, offset_part) = match s.split_once(TIMEZONE_SEP) {
        Some((date, offset)) => (date, Some(offset)),
        None => (s, None),
    };

    let date = NaiveDate::parse_from_str(date_part, DATE_FMT)
        .map_err(|e| PlanError::Format(format!("not a valid date {date_part:?}: {e}")))?;

    let offset = match offset_part {
        Some(text) => Some(parse_offset(text)?),
        None => None,
    };

    Ok(StartDate { date, offset })
}

fn parse_offset(s: &str) -> PlanResult<FixedOffset> {
    let re = Regex::new(OFFSET_RE).map_err(|e| PlanError::Format(e.to_string()))?;
    let caps = re.captures(s).ok_or_else(|| {
        PlanError::Format(format!("timezone offset must look like +HH:MM, got {s:?}"))
    })?;

    let hours: i32 = caps.get(2).unwrap().as_str().parse().unwrap_or(0);
    let mins: i32 = caps.get(3).unwrap().as_str().parse().unwrap_or(0);
    if mins >= 60 {
        return Err(PlanError::Format(format!(
            "timezone offset minutes out of range in {s:?}"
        )));
    }

    let mut secs = hours * 3600 + mins * 60;
    if caps.get(1).unwrap().as_str() == "-" {
        secs = -secs;
    }

    FixedOffset::east_opt(secs).ok_or_else(|| {
        PlanError::Format(format!("timezone offset out of range in {s:?}"))
    })
}
