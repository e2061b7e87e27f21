//! Descriptive statistics of a raw observation upload.

use crate::observations::error::LoadError;
use crate::observations::loader::ObservationFrame;
use polars::prelude::*;

impl ObservationFrame {
    /// Summarises the raw upload as a single-row frame.
    ///
    /// Columns: `count` and `null_count` of temperature readings, the
    /// temperature `mean`, sample `std`, `min` and `max`, and the number of
    /// distinct `cities`. Computed on the frame as loaded, before any
    /// filtering or smoothing.
    pub fn describe(&self) -> Result<DataFrame, LoadError> {
        let temperature = || col("temperature").cast(DataType::Float64);
        let summary = self
            .frame()
            .clone()
            .lazy()
            .select([
                temperature().count().alias("count"),
                temperature().null_count().alias("null_count"),
                temperature().mean().alias("mean"),
                temperature().std(1).alias("std"),
                temperature().min().alias("min"),
                temperature().max().alias("max"),
                col("city").n_unique().alias("cities"),
            ])
            .collect()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_describe() -> Result<(), LoadError> {
        let csv = "\
city,timestamp,temperature
Oslo,2015-01-01,-4.0
Oslo,2015-01-02,
Lima,2015-01-01,20.0
Lima,2015-01-02,22.0
";
        let loaded = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec())?;
        let summary = loaded.describe()?;
        assert_eq!(summary.height(), 1);

        let value = |name: &str| -> Result<f64, LoadError> {
            let column = summary.column(name)?.cast(&DataType::Float64)?;
            Ok(column.f64()?.get(0).unwrap_or(f64::NAN))
        };
        assert_eq!(value("count")?, 3.0);
        assert_eq!(value("null_count")?, 1.0);
        assert_relative_eq!(value("mean")?, 38.0 / 3.0, epsilon = 1e-12);
        assert_eq!(value("min")?, -4.0);
        assert_eq!(value("max")?, 22.0);
        assert_eq!(value("cities")?, 2.0);
        assert!(value("std")? > 0.0);
        Ok(())
    }
}
