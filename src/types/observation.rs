//! Row types flowing through the analysis pipeline.

use crate::types::season::Season;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single temperature reading for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub city: String,
    pub timestamp: NaiveDateTime,
    /// Degrees Celsius. May be NaN when the source value was missing.
    pub temperature: f64,
    /// Taken from the input when present, otherwise derived from the month.
    pub season: Season,
}

impl Observation {
    /// Creates an observation whose season is derived from `timestamp`.
    pub fn new(city: impl Into<String>, timestamp: NaiveDateTime, temperature: f64) -> Self {
        Self {
            city: city.into(),
            timestamp,
            temperature,
            season: Season::from_timestamp(timestamp),
        }
    }

    /// Creates an observation with an explicit season label.
    pub fn with_season(
        city: impl Into<String>,
        timestamp: NaiveDateTime,
        temperature: f64,
        season: Season,
    ) -> Self {
        Self {
            city: city.into(),
            timestamp,
            temperature,
            season,
        }
    }
}

/// An observation that survived the rolling window, annotated with every
/// derived statistic.
///
/// Built once all precursor values are known; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedObservation {
    pub city: String,
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub season: Season,
    /// Mean of the trailing window ending at this row.
    pub rolling_mean: f64,
    /// Sample standard deviation of the trailing window ending at this row.
    pub rolling_std: f64,
    /// Fitted trend value at this timestamp, absent when the trend could not be fitted.
    pub trend_line_point: Option<f64>,
    /// Mean temperature of this row's (city, season) group.
    pub temp_mean: f64,
    /// Sample standard deviation of this row's (city, season) group. `None`
    /// for single-observation groups.
    pub temp_std: Option<f64>,
    pub anomaly: bool,
}
