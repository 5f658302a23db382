//! Lesson inputs: plan rows and duration-expression parsing.

pub mod parse;
pub mod row;

pub use parse::{parse_duration, read_lessons_csv};
pub use row::{DurationSpec, Lesson};
