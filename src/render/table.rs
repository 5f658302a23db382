//! Weekday stamping and serialization of the finished plan as a
//! two-column `Date, Lessons` table.

use crate::calendar::DATE_FMT;
use crate::error::{PlanError, PlanResult};
use crate::timeline::compact::{CompactedEntry, DATE_RANGE_SEP};

use chrono::NaiveDate;
use serde::Serialize;

/// Final display row. Field renames give the CSV its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    #[serde(rename = "Date")]
    pub dates: String,

    #[serde(rename = "Lessons")]
    pub lessons: String,
}

/// Attach weekday names to each entry's date-range token.
///
/// `2026-01-05:2026-01-07` becomes
/// `Monday, 2026-01-05:Wednesday, 2026-01-07`; single dates get one stamp.
/// Purely a display transform, grouping is untouched.
pub fn stamp_weekdays(entries: &[CompactedEntry]) -> PlanResult<Vec<PlanRow>> {
    entries
        .iter()
        .map(|entry| {
            let stamped = entry
                .range
                .token()
                .split(DATE_RANGE_SEP)
                .map(stamp)
                .collect::<PlanResult<Vec<String>>>()?;
            Ok(PlanRow {
                dates: stamped.join(&DATE_RANGE_SEP.to_string()),
                lessons: entry.lessons.clone(),
            })
        })
        .collect()
}

fn stamp(endpoint: &str) -> PlanResult<String> {
    let date = NaiveDate::parse_from_str(endpoint, DATE_FMT)
        .map_err(|e| PlanError::Format(format!("bad date token {endpoint:?}: {e}")))?;
    Ok(format!("{}, {}", date.format("%A"), date.format(DATE_FMT)))
}

/// Write the rows as comma-separated text with a `Date,Lessons` header.
pub fn write_csv<W: std::io::Write>(rows: &[PlanRow], out: W) -> crate::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
