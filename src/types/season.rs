//! Defines the `Season` enum and the fixed Northern-hemisphere month mapping.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four meteorological seasons.
///
/// Seasons are derived from the calendar month using the Northern-hemisphere
/// convention: December, January and February are winter, March to May spring,
/// June to August summer and September to November autumn.
///
/// The ordering of the variants (winter first) is the ordering used for
/// season profile tables.
///
/// # Examples
///
/// ```
/// use climate_profile::Season;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
/// assert_eq!(Season::from_date(date), Season::Winter);
/// assert_eq!("summer".parse::<Season>().unwrap(), Season::Summer);
/// assert_eq!(Season::Autumn.to_string(), "autumn");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Maps a calendar month (1-12) to its season.
    ///
    /// Returns `None` for month numbers outside `1..=12`.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    pub fn from_date(date: NaiveDate) -> Season {
        Season::from_month(date.month()).unwrap_or(Season::Winter)
    }

    pub fn from_timestamp(timestamp: NaiveDateTime) -> Season {
        Season::from_date(timestamp.date())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a season label is not one of the four known names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown season label '{0}'")]
pub struct UnknownSeason(pub String);

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            _ => Err(UnknownSeason(s.to_string())),
        }
    }
}
