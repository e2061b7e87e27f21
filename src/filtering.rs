use crate::types::date_range::IntoTimestamp;
use crate::types::season::Season;
use polars::prelude::{col, lit, DataType, LazyFrame, TimeUnit};

/// Row selection on frames produced by [`crate::TemperatureAnalysis::series_frame`].
pub trait EnrichedFrameFilterExt {
    /// Keeps only rows flagged as anomalies, e.g. for chart markers.
    fn filter_anomalies(self) -> LazyFrame;

    /// Keeps only rows of the given season.
    fn filter_season(self, season: Season) -> LazyFrame;

    /// Filters by timestamp range (inclusive on both ends).
    ///
    /// # Arguments
    /// * `start`: The start bound (inclusive).
    /// * `end`: The end bound (inclusive).
    fn filter_period(self, start: impl IntoTimestamp, end: impl IntoTimestamp) -> LazyFrame;
}

impl EnrichedFrameFilterExt for LazyFrame {
    fn filter_anomalies(self) -> LazyFrame {
        self.filter(col("anomaly"))
    }

    fn filter_season(self, season: Season) -> LazyFrame {
        self.filter(col("season").eq(lit(season.as_str())))
    }

    fn filter_period(self, start: impl IntoTimestamp, end: impl IntoTimestamp) -> LazyFrame {
        let start = start.into_timestamp();
        let end = end.into_timestamp();
        self.filter(
            col("timestamp")
                .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                .gt_eq(lit(start))
                .and(
                    col("timestamp")
                        .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                        .lt_eq(lit(end)),
                ),
        )
    }
}
