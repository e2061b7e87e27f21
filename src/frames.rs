//! Conversion of analysis results into polars frames for display and charting.

use crate::analysis::pipeline::TemperatureAnalysis;
use crate::types::profile::TemperatureStats;
use polars::prelude::*;

fn stats_columns<'a, I>(stats: I) -> Vec<Column>
where
    I: IntoIterator<Item = &'a TemperatureStats> + Clone,
{
    vec![
        Column::new(
            "temp_mean".into(),
            stats.clone().into_iter().map(|s| s.temp_mean).collect::<Vec<f64>>(),
        ),
        Column::new(
            "temp_std".into(),
            stats.clone().into_iter().map(|s| s.temp_std).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "temp_min".into(),
            stats.clone().into_iter().map(|s| s.temp_min).collect::<Vec<f64>>(),
        ),
        Column::new(
            "temp_max".into(),
            stats.into_iter().map(|s| s.temp_max).collect::<Vec<f64>>(),
        ),
    ]
}

impl TemperatureAnalysis {
    /// The enriched series as a frame.
    ///
    /// `timestamp` is a millisecond `Datetime` column and `season` a string
    /// column; undefined values (`trend_line_point`, `temp_std`) are null.
    pub fn series_frame(&self) -> PolarsResult<DataFrame> {
        let rows = &self.series;
        let timestamp = Column::new(
            "timestamp".into(),
            rows.iter()
                .map(|r| r.timestamp.and_utc().timestamp_millis())
                .collect::<Vec<i64>>(),
        )
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        DataFrame::new(vec![
            Column::new(
                "city".into(),
                rows.iter().map(|r| r.city.as_str()).collect::<Vec<&str>>(),
            ),
            timestamp,
            Column::new(
                "temperature".into(),
                rows.iter().map(|r| r.temperature).collect::<Vec<f64>>(),
            ),
            Column::new(
                "season".into(),
                rows.iter().map(|r| r.season.as_str()).collect::<Vec<&str>>(),
            ),
            Column::new(
                "rolling_mean".into(),
                rows.iter().map(|r| r.rolling_mean).collect::<Vec<f64>>(),
            ),
            Column::new(
                "rolling_std".into(),
                rows.iter().map(|r| r.rolling_std).collect::<Vec<f64>>(),
            ),
            Column::new(
                "trend_line_point".into(),
                rows.iter()
                    .map(|r| r.trend_line_point)
                    .collect::<Vec<Option<f64>>>(),
            ),
            Column::new(
                "temp_mean".into(),
                rows.iter().map(|r| r.temp_mean).collect::<Vec<f64>>(),
            ),
            Column::new(
                "temp_std".into(),
                rows.iter().map(|r| r.temp_std).collect::<Vec<Option<f64>>>(),
            ),
            Column::new(
                "anomaly".into(),
                rows.iter().map(|r| r.anomaly).collect::<Vec<bool>>(),
            ),
        ])
    }

    /// One row per season: `city`, `season` and the four aggregates.
    pub fn season_profile_frame(&self) -> PolarsResult<DataFrame> {
        let profiles = &self.season_profiles;
        let mut columns = vec![
            Column::new(
                "city".into(),
                profiles.iter().map(|p| p.city.as_str()).collect::<Vec<&str>>(),
            ),
            Column::new(
                "season".into(),
                profiles.iter().map(|p| p.season.as_str()).collect::<Vec<&str>>(),
            ),
        ];
        columns.extend(stats_columns(profiles.iter().map(|p| &p.stats)));
        DataFrame::new(columns)
    }

    /// A single row: `city` and the four aggregates.
    pub fn city_profile_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![Column::new(
            "city".into(),
            vec![self.city_profile.city.as_str()],
        )];
        columns.extend(stats_columns([&self.city_profile.stats]));
        DataFrame::new(columns)
    }
}
