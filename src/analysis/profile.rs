//! Grouped temperature aggregates per (city, season) and per city.

use crate::types::profile::{CityProfile, SeasonProfile, TemperatureStats};
use crate::types::season::Season;
use std::collections::BTreeMap;

/// Groups rows by `(city, season)` and aggregates their temperatures.
///
/// Profiles are returned sorted by city, then by season (winter first).
pub fn season_profiles<'a, I>(rows: I) -> Vec<SeasonProfile>
where
    I: IntoIterator<Item = (&'a str, Season, f64)>,
{
    let mut groups: BTreeMap<(&'a str, Season), Vec<f64>> = BTreeMap::new();
    for (city, season, temperature) in rows {
        groups.entry((city, season)).or_default().push(temperature);
    }

    groups
        .into_iter()
        .filter_map(|((city, season), temps)| {
            TemperatureStats::from_values(temps).map(|stats| SeasonProfile {
                city: city.to_string(),
                season,
                stats,
            })
        })
        .collect()
}

/// Groups rows by city and aggregates their temperatures, sorted by city.
pub fn city_profiles<'a, I>(rows: I) -> Vec<CityProfile>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut groups: BTreeMap<&'a str, Vec<f64>> = BTreeMap::new();
    for (city, temperature) in rows {
        groups.entry(city).or_default().push(temperature);
    }

    groups
        .into_iter()
        .filter_map(|(city, temps)| {
            TemperatureStats::from_values(temps).map(|stats| CityProfile {
                city: city.to_string(),
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_groups_by_city_and_season() {
        let rows = vec![
            ("Berlin", Season::Summer, 20.0),
            ("Berlin", Season::Winter, -1.0),
            ("Berlin", Season::Summer, 24.0),
            ("Berlin", Season::Winter, 3.0),
            ("Cairo", Season::Summer, 35.0),
        ];
        let profiles = season_profiles(rows);
        assert_eq!(profiles.len(), 3);

        assert_eq!(profiles[0].city, "Berlin");
        assert_eq!(profiles[0].season, Season::Winter);
        assert_relative_eq!(profiles[0].stats.temp_mean, 1.0);
        assert_relative_eq!(profiles[0].stats.temp_std.unwrap(), 8.0f64.sqrt());
        assert_eq!(profiles[0].stats.temp_min, -1.0);
        assert_eq!(profiles[0].stats.temp_max, 3.0);

        assert_eq!(profiles[1].season, Season::Summer);
        assert_relative_eq!(profiles[1].stats.temp_mean, 22.0);

        assert_eq!(profiles[2].city, "Cairo");
    }

    #[test]
    fn test_single_observation_group_has_undefined_std() {
        let profiles = season_profiles(vec![("Cairo", Season::Summer, 35.0)]);
        assert_eq!(profiles[0].stats.temp_std, None);
        assert_eq!(profiles[0].stats.temp_min, 35.0);
        assert_eq!(profiles[0].stats.temp_max, 35.0);
    }

    #[test]
    fn test_city_profiles() {
        let profiles = city_profiles(vec![("Rome", 10.0), ("Oslo", -2.0), ("Rome", 14.0)]);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].city, "Oslo");
        assert_eq!(profiles[0].stats.temp_std, None);
        assert_eq!(profiles[1].city, "Rome");
        assert_relative_eq!(profiles[1].stats.temp_mean, 12.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(season_profiles(Vec::new()).is_empty());
        assert!(city_profiles(Vec::new()).is_empty());
    }
}
