//! Inclusive timestamp ranges used to restrict an analysis to a period.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Conversion of the supported date-like types into a naive timestamp bound.
///
/// Dates resolve to midnight at the start of the day, so a range ending on a
/// `NaiveDate` includes observations stamped exactly at that midnight (the
/// usual case for daily data) but not later in that day.
pub trait IntoTimestamp {
    fn into_timestamp(self) -> NaiveDateTime;
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> NaiveDateTime {
        self
    }
}

impl IntoTimestamp for NaiveDate {
    fn into_timestamp(self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }
}

impl IntoTimestamp for DateTime<Utc> {
    fn into_timestamp(self) -> NaiveDateTime {
        self.naive_utc()
    }
}

/// An inclusive `[start, end]` timestamp range.
///
/// # Examples
///
/// ```
/// use climate_profile::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
/// );
/// let last_day = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert!(range.contains(last_day));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: impl IntoTimestamp, end: impl IntoTimestamp) -> Self {
        Self {
            start: start.into_timestamp(),
            end: end.into_timestamp(),
        }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}
