use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

/// The point in the pipeline at which the working series became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStage {
    /// No observations matched the city and date range.
    Filter,
    /// Observations matched, but none had a full rolling window.
    RollingWindow,
}

impl fmt::Display for EmptyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyStage::Filter => write!(f, "city/date filter"),
            EmptyStage::RollingWindow => write!(f, "rolling window"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Not enough data to fit a trend for '{city}': {distinct_timestamps} distinct timestamp(s)")]
    InsufficientData {
        city: String,
        distinct_timestamps: usize,
    },

    #[error("No rows left for '{city}' after the {stage}")]
    EmptyResult { city: String, stage: EmptyStage },

    #[error("Rolling window size must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("Date range start {start} is after its end {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl AnalysisError {
    /// True for the "nothing to show" condition, which callers usually render
    /// as an empty state rather than an error message.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, AnalysisError::EmptyResult { .. })
    }
}
