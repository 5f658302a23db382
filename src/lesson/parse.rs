use crate::error::{PlanError, PlanResult};
use crate::lesson::row::{DurationSpec, Lesson};

use anyhow::{Context, bail};

/// Parse a free-text duration expression into a [`DurationSpec`].
///
/// The expression is whitespace-separated pairs of magnitude and unit:
///
/// ```text
/// 1 week 3 days 2 hours 30 mins
/// ```
///
/// Unit keywords are matched case-sensitively; repeated units accumulate.
pub fn parse_duration(expr: &str) -> PlanResult<DurationSpec> {
    let trimmed = expr.trim_matches([' ', '\t']);
    let tokens: Vec<&str> = trimmed.split(' ').collect();

    if tokens.len() % 2 != 0 {
        return Err(PlanError::Format(format!(
            "expected an even number of elements in {tokens:?}"
        )));
    }

    let mut spec = DurationSpec::default();
    for pair in tokens.chunks(2) {
        let magnitude: f64 = pair[0].parse().map_err(|_| {
            PlanError::Format(format!(
                "cannot parse magnitude {:?} in {tokens:?}",
                pair[0]
            ))
        })?;
        if magnitude < 0.0 {
            return Err(PlanError::Value(format!(
                "invalid value for time {magnitude} in {tokens:?}"
            )));
        }

        match pair[1] {
            "mins" | "minute" | "minutes" => spec.mins += magnitude,
            "hour" | "hours" => spec.hours += magnitude,
            "day" | "days" => spec.days += magnitude,
            "week" | "weeks" => spec.weeks += magnitude,
            unit => {
                return Err(PlanError::Value(format!(
                    "invalid unit {unit:?} when trying to parse {tokens:?}"
                )));
            }
        }
    }

    Ok(spec)
}

/// Read lessons from a headerless plan CSV.
///
/// Per row, column 1 is the lesson name and column 2 the duration
/// expression; column 0 is ignored (the course export carries a lesson
/// number there). All rows are parsed up front, so one bad duration string
/// fails the whole file.
pub fn read_lessons_csv(path: &str) -> crate::Result<Vec<Lesson>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read plan file {}", path))?;

    let mut lessons = Vec::new();
    for (lineno, result) in reader.records().enumerate() {
        let lno = lineno + 1;
        let record = result.with_context(|| format!("read plan row {}:{}", path, lno))?;

        let name = record.get(1).ok_or_else(|| {
            PlanError::Format(format!("plan row {}:{} has no lesson name column", path, lno))
        })?;
        let expr = record.get(2).ok_or_else(|| {
            PlanError::Format(format!("plan row {}:{} has no duration column", path, lno))
        })?;

        let lesson = Lesson::new(name.trim(), expr)
            .with_context(|| format!("bad duration for lesson {:?} at {}:{}", name, path, lno))?;
        lessons.push(lesson);
    }

    if lessons.is_empty() {
        bail!("plan file {} contained no lessons", path);
    }

    Ok(lessons)
}
