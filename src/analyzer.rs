//! This module provides the main entry point for analysing temperature series.
//! An analyzer holds the rolling window configuration and runs the analysis
//! for one city over an optional inclusive date range.

use crate::analysis::error::AnalysisError;
use crate::analysis::pipeline::{self, TemperatureAnalysis};
use crate::types::date_range::DateRange;
use crate::types::observation::Observation;
use bon::bon;

/// Default number of observations in the trailing rolling window.
pub const DEFAULT_WINDOW: usize = 30;

/// Runs the temperature analysis pipeline.
///
/// Every call recomputes everything from the observations it is given;
/// nothing is cached between calls.
///
/// # Examples
///
/// ```rust
/// # use climate_profile::{AnalysisError, Observation, TemperatureAnalyzer};
/// # use chrono::{Duration, NaiveDate};
/// # fn main() -> Result<(), AnalysisError> {
/// let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let observations: Vec<Observation> = (0..40)
///     .map(|i| Observation::new("Lisbon", start + Duration::days(i), 22.0))
///     .collect();
///
/// let analyzer = TemperatureAnalyzer::builder().window(30).build()?;
/// let analysis = analyzer
///     .analyze()
///     .observations(&observations)
///     .city("Lisbon")
///     .call()?;
///
/// assert_eq!(analysis.series.len(), 11);
/// assert_eq!(analysis.city_profile.stats.temp_mean, 22.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureAnalyzer {
    window: usize,
}

impl Default for TemperatureAnalyzer {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

#[bon]
impl TemperatureAnalyzer {
    /// Creates an analyzer.
    ///
    /// # Arguments
    ///
    /// * `.window(usize)`: Optional. Size of the trailing rolling window. Defaults to `30`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidWindow`] for a window of zero.
    #[builder]
    pub fn new(window: Option<usize>) -> Result<Self, AnalysisError> {
        let window = window.unwrap_or(DEFAULT_WINDOW);
        if window == 0 {
            return Err(AnalysisError::InvalidWindow(window));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Analyses the observations of one city.
    ///
    /// The observations are filtered to `city` and, when given, to the
    /// inclusive `period`, then ordered chronologically. Rows without a full
    /// rolling window are dropped before the trend, the profiles and the
    /// anomaly flags are computed, so the first `window - 1` rows of the
    /// filtered series never appear in the result.
    ///
    /// # Arguments
    ///
    /// * `.observations(&[Observation])`: **Required.** All observations, any city, any order.
    /// * `.city(&str)`: **Required.** The city to analyse.
    /// * `.period(DateRange)`: Optional. Inclusive timestamp range. Defaults to everything.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyResult`] when no rows match or none has a
    /// full window, and [`AnalysisError::InvalidDateRange`] when the period's
    /// start is after its end. A trend that cannot be fitted is reported in
    /// [`TemperatureAnalysis::trend`] instead of failing the call.
    #[builder]
    pub fn analyze(
        &self,
        observations: &[Observation],
        city: &str,
        period: Option<DateRange>,
    ) -> Result<TemperatureAnalysis, AnalysisError> {
        pipeline::run(observations, city, period, self.window)
    }
}
