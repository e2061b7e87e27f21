//! Orchestration of smoothing, trend fitting, profiling and anomaly detection
//! over one city's observations.

use crate::analysis::anomaly::is_anomaly;
use crate::analysis::error::{AnalysisError, EmptyStage};
use crate::analysis::profile::{city_profiles, season_profiles};
use crate::analysis::rolling::rolling_stats;
use crate::analysis::trend::{fit_trend, Trend};
use crate::types::date_range::DateRange;
use crate::types::observation::{EnrichedObservation, Observation};
use crate::types::profile::{CityProfile, SeasonProfile, TemperatureStats};
use crate::types::season::Season;
use log::{debug, warn};
use std::collections::HashMap;

/// Everything computed for one city over one period.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureAnalysis {
    pub city: String,
    /// Rows with a full rolling window, in chronological order.
    pub series: Vec<EnrichedObservation>,
    /// The fitted trend, or the reason it could not be fitted. A failed fit
    /// does not affect the other outputs.
    pub trend: Result<Trend, AnalysisError>,
    /// At most one profile per season present in `series`.
    pub season_profiles: Vec<SeasonProfile>,
    pub city_profile: CityProfile,
}

impl TemperatureAnalysis {
    /// The trend slope, if a trend was fitted.
    pub fn trend_coefficient(&self) -> Option<f64> {
        self.trend.as_ref().ok().map(|t| t.slope)
    }

    pub fn season_profile(&self, season: Season) -> Option<&SeasonProfile> {
        self.season_profiles.iter().find(|p| p.season == season)
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &EnrichedObservation> {
        self.series.iter().filter(|row| row.anomaly)
    }
}

/// A filtered observation with a complete rolling window.
struct SmoothedRow<'a> {
    observation: &'a Observation,
    rolling_mean: f64,
    rolling_std: f64,
}

pub(crate) fn run(
    observations: &[Observation],
    city: &str,
    period: Option<DateRange>,
    window: usize,
) -> Result<TemperatureAnalysis, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow(window));
    }
    if let Some(range) = period.filter(DateRange::is_inverted) {
        return Err(AnalysisError::InvalidDateRange {
            start: range.start,
            end: range.end,
        });
    }

    let mut filtered: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.city == city)
        .filter(|o| period.map_or(true, |range| range.contains(o.timestamp)))
        .collect();
    debug!(
        "{} of {} observations match city '{}'",
        filtered.len(),
        observations.len(),
        city
    );
    if filtered.is_empty() {
        return Err(AnalysisError::EmptyResult {
            city: city.to_string(),
            stage: EmptyStage::Filter,
        });
    }

    // Stable, so duplicate timestamps keep their input order.
    filtered.sort_by_key(|o| o.timestamp);

    let temperatures: Vec<f64> = filtered.iter().map(|o| o.temperature).collect();
    let smoothed: Vec<SmoothedRow> = filtered
        .iter()
        .copied()
        .zip(rolling_stats(&temperatures, window))
        .filter_map(|(observation, stats)| match (stats.mean, stats.std) {
            (Some(rolling_mean), Some(rolling_std)) => Some(SmoothedRow {
                observation,
                rolling_mean,
                rolling_std,
            }),
            _ => None,
        })
        .collect();
    debug!(
        "{} rows for '{}' have a full window of {}",
        smoothed.len(),
        city,
        window
    );
    if smoothed.is_empty() {
        return Err(AnalysisError::EmptyResult {
            city: city.to_string(),
            stage: EmptyStage::RollingWindow,
        });
    }

    let timestamps: Vec<_> = smoothed.iter().map(|r| r.observation.timestamp).collect();
    let means: Vec<f64> = smoothed.iter().map(|r| r.rolling_mean).collect();
    let (trend, trend_points) = match fit_trend(city, &timestamps, &means) {
        Ok(fit) => (Ok(fit.trend), fit.points.into_iter().map(Some).collect::<Vec<_>>()),
        Err(e) => {
            warn!("Trend not fitted: {}", e);
            (Err(e), vec![None; smoothed.len()])
        }
    };

    let season_profiles = season_profiles(smoothed.iter().map(|r| {
        (
            r.observation.city.as_str(),
            r.observation.season,
            r.observation.temperature,
        )
    }));

    let profile_index: HashMap<(&str, Season), &TemperatureStats> = season_profiles
        .iter()
        .map(|p| ((p.city.as_str(), p.season), &p.stats))
        .collect();

    let series: Vec<EnrichedObservation> = smoothed
        .iter()
        .zip(trend_points)
        .filter_map(|(row, trend_line_point)| {
            let obs = row.observation;
            let stats = profile_index.get(&(obs.city.as_str(), obs.season))?;
            Some(EnrichedObservation {
                city: obs.city.clone(),
                timestamp: obs.timestamp,
                temperature: obs.temperature,
                season: obs.season,
                rolling_mean: row.rolling_mean,
                rolling_std: row.rolling_std,
                trend_line_point,
                temp_mean: stats.temp_mean,
                temp_std: stats.temp_std,
                anomaly: is_anomaly(obs.temperature, stats.temp_mean, stats.temp_std),
            })
        })
        .collect();

    let city_profile = city_profiles(series.iter().map(|r| (r.city.as_str(), r.temperature)))
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::EmptyResult {
            city: city.to_string(),
            stage: EmptyStage::RollingWindow,
        })?;

    debug!(
        "'{}': {} enriched rows, {} season profile(s), {} anomalies",
        city,
        series.len(),
        season_profiles.len(),
        series.iter().filter(|r| r.anomaly).count()
    );

    Ok(TemperatureAnalysis {
        city: city.to_string(),
        series,
        trend,
        season_profiles,
        city_profile,
    })
}
