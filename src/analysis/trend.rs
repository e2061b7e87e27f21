//! Ordinary least squares trend of smoothed temperature against time.

use crate::analysis::error::AnalysisError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Direction implied by the sign of a trend slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Upward,
    Downward,
    /// The slope is exactly zero.
    Flat,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Upward => write!(f, "upward"),
            TrendDirection::Downward => write!(f, "downward"),
            TrendDirection::Flat => write!(f, "no change"),
        }
    }
}

/// A fitted straight line `value = slope * nanos + intercept`.
///
/// The predictor is the timestamp in nanoseconds since the Unix epoch, so the
/// slope is expressed in degrees per nanosecond. Only its sign is meant to be
/// interpreted; the magnitude is reported as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn direction(&self) -> TrendDirection {
        if self.slope > 0.0 {
            TrendDirection::Upward
        } else if self.slope < 0.0 {
            TrendDirection::Downward
        } else {
            TrendDirection::Flat
        }
    }

    pub fn predict(&self, timestamp: NaiveDateTime) -> f64 {
        self.slope * timestamp_nanos(timestamp) + self.intercept
    }
}

/// Result of fitting a trend over a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub trend: Trend,
    /// The fitted value at each input timestamp, in input order.
    pub points: Vec<f64>,
}

fn timestamp_nanos(timestamp: NaiveDateTime) -> f64 {
    let utc = timestamp.and_utc();
    // Outside the ~1677..2262 nanosecond window fall back to microsecond precision.
    match utc.timestamp_nanos_opt() {
        Some(nanos) => nanos as f64,
        None => utc.timestamp_micros() as f64 * 1_000.0,
    }
}

/// Fits `values` against `timestamps` by ordinary least squares with an intercept.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] when fewer than two distinct
/// timestamps are present, or the timestamps have zero variance.
pub fn fit_trend(
    city: &str,
    timestamps: &[NaiveDateTime],
    values: &[f64],
) -> Result<TrendFit, AnalysisError> {
    let distinct = timestamps.iter().collect::<HashSet<_>>().len();
    let insufficient = || AnalysisError::InsufficientData {
        city: city.to_string(),
        distinct_timestamps: distinct,
    };
    if distinct < 2 || timestamps.len() != values.len() {
        return Err(insufficient());
    }

    // Centre on the first timestamp so the squared deviations stay well inside f64 range.
    let origin = timestamp_nanos(timestamps[0]);
    let xs: Vec<f64> = timestamps
        .iter()
        .map(|t| timestamp_nanos(*t) - origin)
        .collect();

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = values.iter().sum::<f64>() / n;

    let (ss_xx, ss_xy) = xs
        .iter()
        .zip(values)
        .fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

    if ss_xx == 0.0 || !ss_xx.is_finite() {
        return Err(insufficient());
    }

    let slope = ss_xy / ss_xx;
    let centred_intercept = mean_y - slope * mean_x;
    let points = xs.iter().map(|x| slope * x + centred_intercept).collect();

    Ok(TrendFit {
        trend: Trend {
            slope,
            intercept: centred_intercept - slope * origin,
        },
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn days(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| start + Duration::days(i as i64)).collect()
    }

    #[test]
    fn test_constant_values_have_zero_slope() {
        let ts = days(11);
        let fit = fit_trend("X", &ts, &[10.0; 11]).unwrap();
        assert_eq!(fit.trend.slope, 0.0);
        assert_eq!(fit.trend.direction(), TrendDirection::Flat);
        for p in fit.points {
            assert_relative_eq!(p, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_linear_values_are_reproduced() {
        let ts = days(50);
        let values: Vec<f64> = (0..50).map(|i| 0.5 * i as f64 - 3.0).collect();
        let fit = fit_trend("X", &ts, &values).unwrap();
        assert!(fit.trend.slope > 0.0);
        assert_eq!(fit.trend.direction(), TrendDirection::Upward);
        let per_day = fit.trend.slope * 86_400.0 * 1e9;
        assert_relative_eq!(per_day, 0.5, epsilon = 1e-9);
        for (p, v) in fit.points.iter().zip(&values) {
            assert_relative_eq!(*p, *v, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_decreasing_values() {
        let ts = days(5);
        let fit = fit_trend("X", &ts, &[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap();
        assert_eq!(fit.trend.direction(), TrendDirection::Downward);
    }

    #[test]
    fn test_predict_matches_points() {
        let ts = days(10);
        let values: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let fit = fit_trend("X", &ts, &values).unwrap();
        for (t, p) in ts.iter().zip(&fit.points) {
            assert_relative_eq!(fit.trend.predict(*t), *p, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_single_distinct_timestamp_is_insufficient() {
        let ts = days(1);
        let repeated = vec![ts[0]; 4];
        let err = fit_trend("Oslo", &repeated, &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                city: "Oslo".to_string(),
                distinct_timestamps: 1
            }
        );
        assert!(fit_trend("Oslo", &[], &[]).is_err());
    }
}
