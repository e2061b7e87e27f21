//! Concurrent per-city fetching and comparison against seasonal norms.

use crate::live::client::TemperatureSource;
use crate::live::error::LiveTemperatureError;
use crate::types::profile::SeasonProfile;
use crate::types::season::Season;
use futures_util::future::join_all;
use log::{info, warn};
use std::collections::BTreeMap;

/// Outcome of fetching the current temperature for each requested city.
///
/// Keyed by city name, so iteration order does not depend on which request
/// completed first.
#[derive(Debug, Default)]
pub struct LiveReadings {
    outcomes: BTreeMap<String, Result<f64, LiveTemperatureError>>,
}

impl LiveReadings {
    pub fn get(&self, city: &str) -> Option<&Result<f64, LiveTemperatureError>> {
        self.outcomes.get(city)
    }

    /// The temperature for `city`, if it was fetched successfully.
    pub fn temperature(&self, city: &str) -> Option<f64> {
        self.outcomes.get(city)?.as_ref().ok().copied()
    }

    /// True when any request was rejected for an invalid API key.
    pub fn authentication_failed(&self) -> bool {
        self.outcomes
            .values()
            .any(|r| matches!(r, Err(e) if e.is_authentication()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<f64, LiveTemperatureError>)> {
        self.outcomes.iter().map(|(city, r)| (city.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Fetches the current temperature for every city concurrently.
///
/// All requests are started together and awaited as a group. A failing city
/// never cancels or affects the others; each outcome is recorded separately.
/// Duplicate city names are fetched once.
pub async fn fetch_current_temperatures<S, I, C>(source: &S, api_key: &str, cities: I) -> LiveReadings
where
    S: TemperatureSource,
    I: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    let mut unique: Vec<String> = cities.into_iter().map(|c| c.as_ref().to_string()).collect();
    unique.sort();
    unique.dedup();
    info!("Fetching current temperature for {} cities", unique.len());

    let results = join_all(
        unique
            .iter()
            .map(|city| source.current_temperature(api_key, city)),
    )
    .await;

    let outcomes: BTreeMap<String, Result<f64, LiveTemperatureError>> =
        unique.into_iter().zip(results).collect();
    for (city, outcome) in &outcomes {
        if let Err(e) = outcome {
            warn!("No current temperature for {}: {}", city, e);
        }
    }
    LiveReadings { outcomes }
}

/// How a current reading relates to the historical profile of its season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormComparison {
    /// More than two standard deviations away from the season mean.
    Abnormal,
    WithinNorm,
}

/// Compares a current temperature against the profile for `season`.
///
/// Returns `None` when there is no profile for the season, or its standard
/// deviation is undefined or zero.
///
/// # Examples
///
/// ```
/// use climate_profile::{compare_to_season_norm, NormComparison, Season, SeasonProfile, TemperatureStats};
///
/// let profiles = vec![SeasonProfile {
///     city: "Oslo".to_string(),
///     season: Season::Winter,
///     stats: TemperatureStats::from_values([-8.0, -4.0, -6.0]).unwrap(),
/// }];
/// assert_eq!(compare_to_season_norm(&profiles, Season::Winter, -5.0), Some(NormComparison::WithinNorm));
/// assert_eq!(compare_to_season_norm(&profiles, Season::Winter, 5.0), Some(NormComparison::Abnormal));
/// assert_eq!(compare_to_season_norm(&profiles, Season::Summer, 5.0), None);
/// ```
pub fn compare_to_season_norm(
    profiles: &[SeasonProfile],
    season: Season,
    current: f64,
) -> Option<NormComparison> {
    let profile = profiles.iter().find(|p| p.season == season)?;
    let std = profile.stats.temp_std.filter(|s| *s > 0.0)?;
    if (profile.stats.temp_mean - current).abs() / std > 2.0 {
        Some(NormComparison::Abnormal)
    } else {
        Some(NormComparison::WithinNorm)
    }
}
