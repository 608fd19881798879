//! Error type shared by the conversion core, the renderer and the CLI.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),
    #[error("Invalid day: {day} (month {month} of year {year} has {max} days)")]
    InvalidDay {
        year: i32,
        month: u32,
        day: u32,
        max: u32,
    },
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid columns value: {0}")]
    InvalidColumns(String),
}
