use thiserror::Error;
use time::Date;

/// Validation failures raised by calendar configuration, event insertion and
/// rendering.  None of these are transient; each one points at a bad input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    #[error("event ends on {end} before it starts on {start}")]
    InvalidRange { start: Date, end: Date },

    #[error("expected {expected} labels, got {actual}")]
    InvalidLabelCount { expected: usize, actual: usize },

    #[error("cannot resolve {value:?} to a day of the week")]
    InvalidOffset { value: String },

    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: i64 },

    #[error("year {year} is outside the supported range")]
    InvalidYear { year: i32 },

    #[error("cannot parse {value:?} as a date")]
    InvalidDate { value: String },
}
