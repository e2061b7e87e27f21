//! Aggregate temperature profiles.

use crate::types::season::Season;
use serde::{Deserialize, Serialize};

/// Mean, sample standard deviation, minimum and maximum of a group of temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub temp_mean: f64,
    /// `None` when the group holds a single value (the N-1 denominator is zero).
    pub temp_std: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl TemperatureStats {
    /// Aggregates the given temperatures. Returns `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// use climate_profile::TemperatureStats;
    ///
    /// let stats = TemperatureStats::from_values([1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(stats.temp_mean, 2.0);
    /// assert_eq!(stats.temp_std, Some(1.0));
    ///
    /// let single = TemperatureStats::from_values([4.0]).unwrap();
    /// assert_eq!(single.temp_std, None);
    /// ```
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if values.len() > 1 {
            let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            Some((ss / (n - 1.0)).sqrt())
        } else {
            None
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            temp_mean: mean,
            temp_std: std,
            temp_min: min,
            temp_max: max,
        })
    }
}

/// Temperature profile of one season within one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProfile {
    pub city: String,
    pub season: Season,
    pub stats: TemperatureStats,
}

/// Temperature profile of a whole city over the analysed rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    pub city: String,
    pub stats: TemperatureStats,
}
