use crate::error::PlanResult;

const DAYS_PER_WEEK: f64 = 7.0;
const MINS_PER_HOUR: f64 = 60.0;

/// Normalized duration accumulated from a free-text estimate.
///
/// All fields are non-negative; repeated units within one expression sum
/// into the same field ("1 week 3 days 3 days" ends up with days = 6).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationSpec {
    pub weeks: f64,
    pub days: f64,
    pub hours: f64,
    pub mins: f64,
}

impl DurationSpec {
    /// Collapse the accumulated fields into a scalar hour requirement.
    ///
    /// `expected_weekly_hours` is what the learner intends to commit per
    /// 7-day week; a "day" of course material counts as one seventh of it.
    pub fn to_hours(&self, expected_weekly_hours: f64) -> f64 {
        self.weeks * expected_weekly_hours
            + self.days * (expected_weekly_hours / DAYS_PER_WEEK)
            + self.hours
            + self.mins / MINS_PER_HOUR
    }
}

/// One lesson from the input plan. Input order is allocation priority.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub name: String,
    pub time_required: DurationSpec,
}

impl Lesson {
    pub fn new(name: impl Into<String>, expr: &str) -> PlanResult<Self> {
        Ok(Self {
            name: name.into(),
            time_required: crate::lesson::parse_duration(expr)?,
        })
    }
}
