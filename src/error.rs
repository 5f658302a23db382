//! Error taxonomy for the scheduling core.
//!
//! All failures here are synchronous, non-retriable input problems: the core
//! does no I/O, so an error always means bad input data (`Format`, `Value`)
//! or bad configuration (`Config`). Callers can match on the variant to tell
//! the two apart.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed duration expression, date string, or lesson row.
    #[error("format error: {0}")]
    Format(String),

    /// Negative magnitude or unrecognized unit keyword. The message carries
    /// the offending value and the full token list.
    #[error("value error: {0}")]
    Value(String),

    /// Unusable commitment calendar (wrong count, negative or too-small
    /// capacities).
    #[error("config error: {0}")]
    Config(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
