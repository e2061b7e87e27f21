//! Reads tabular observation data into [`Observation`] rows using polars.

use crate::observations::error::LoadError;
use crate::types::date_range::DateRange;
use crate::types::observation::Observation;
use crate::types::season::Season;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tokio::{fs, task};

const CITY: &str = "city";
const TIMESTAMP: &str = "timestamp";
const TEMPERATURE: &str = "temperature";
const SEASON: &str = "season";

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A loaded observation table: the raw polars frame alongside the typed rows
/// parsed from it.
#[derive(Debug, Clone)]
pub struct ObservationFrame {
    frame: DataFrame,
    observations: Vec<Observation>,
}

impl ObservationFrame {
    /// Reads a CSV file with a header row.
    ///
    /// Parsing runs on a blocking task.
    pub async fn from_path(path: &Path) -> Result<Self, LoadError> {
        fs::metadata(path)
            .await
            .map_err(|e| LoadError::FileRead(path.to_path_buf(), e))?;

        let path_buf = path.to_path_buf();
        let loaded = task::spawn_blocking(move || {
            let frame = CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path_buf))
                .map_err(LoadError::CsvParse)?
                .finish()
                .map_err(LoadError::CsvParse)?;
            Self::from_frame(frame)
        })
        .await??;

        info!(
            "Loaded {} observations from {}",
            loaded.observations.len(),
            path.display()
        );
        Ok(loaded)
    }

    /// Reads CSV data with a header row from memory.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(LoadError::CsvParse)?;
        Self::from_frame(frame)
    }

    /// Converts an already loaded frame.
    ///
    /// `city`, `timestamp` and `temperature` are required; `season` is
    /// optional. A season label present in the data is used as is, a missing
    /// one is derived from the timestamp's month.
    pub fn from_frame(frame: DataFrame) -> Result<Self, LoadError> {
        let city_col = cast_column(&frame, CITY, &DataType::String, "string")?;
        let cities = city_col.str().map_err(|e| column_type(CITY, "string", e))?;

        let timestamp_col = cast_column(&frame, TIMESTAMP, &DataType::String, "string")?;
        let timestamps = timestamp_col
            .str()
            .map_err(|e| column_type(TIMESTAMP, "string", e))?;

        let temperature_col = cast_column(&frame, TEMPERATURE, &DataType::Float64, "float")?;
        let temperatures = temperature_col
            .f64()
            .map_err(|e| column_type(TEMPERATURE, "float", e))?;

        let season_col = match frame.column(SEASON) {
            Ok(column) => Some(
                column
                    .cast(&DataType::String)
                    .map_err(|e| column_type(SEASON, "string", e))?,
            ),
            Err(_) => {
                debug!("No '{}' column, deriving seasons from timestamps", SEASON);
                None
            }
        };
        let seasons = season_col
            .as_ref()
            .map(|c| c.str().map_err(|e| column_type(SEASON, "string", e)))
            .transpose()?;

        let mut observations = Vec::with_capacity(frame.height());
        for row in 0..frame.height() {
            let city = cities.get(row).ok_or_else(|| LoadError::NullValue {
                column: CITY.to_string(),
                row,
            })?;
            let raw_timestamp = timestamps.get(row).ok_or_else(|| LoadError::NullValue {
                column: TIMESTAMP.to_string(),
                row,
            })?;
            let timestamp =
                parse_timestamp(raw_timestamp).ok_or_else(|| LoadError::InvalidTimestamp {
                    value: raw_timestamp.to_string(),
                    row,
                })?;
            let temperature = temperatures.get(row).unwrap_or(f64::NAN);
            let season = match seasons.and_then(|s| s.get(row)) {
                Some(label) => label
                    .parse::<Season>()
                    .map_err(|source| LoadError::InvalidSeason { row, source })?,
                None => Season::from_timestamp(timestamp),
            };
            observations.push(Observation::with_season(city, timestamp, temperature, season));
        }

        Ok(Self {
            frame,
            observations,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Distinct cities in order of first appearance.
    pub fn cities(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.observations
            .iter()
            .filter(|o| seen.insert(o.city.as_str()))
            .map(|o| o.city.clone())
            .collect()
    }

    /// The earliest and latest timestamp, usable as the default analysis period.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.observations.iter().map(|o| o.timestamp).min()?;
        let end = self.observations.iter().map(|o| o.timestamp).max()?;
        Some(DateRange { start, end })
    }
}

fn cast_column(
    frame: &DataFrame,
    name: &str,
    dtype: &DataType,
    expected: &'static str,
) -> Result<Column, LoadError> {
    frame
        .column(name)
        .map_err(|e| LoadError::MissingColumn(name.to_string(), e))?
        .strict_cast(dtype)
        .map_err(|e| column_type(name, expected, e))
}

fn column_type(column: &str, expected: &'static str, source: PolarsError) -> LoadError {
    LoadError::ColumnType {
        column: column.to_string(),
        expected,
        source,
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.f]`, the `T`-separated form and RFC 3339.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
city,timestamp,temperature,season
Berlin,2010-01-01,-2.5,winter
Cairo,2010-01-01,15,winter
Berlin,2010-01-02,-1.0,winter
Berlin,2010-06-01,21.5,summer
";

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_csv_bytes() -> Result<(), LoadError> {
        let loaded = ObservationFrame::from_csv_bytes(SAMPLE.as_bytes().to_vec())?;
        let obs = loaded.observations();
        assert_eq!(obs.len(), 4);
        assert_eq!(obs[0].city, "Berlin");
        assert_eq!(obs[0].timestamp, day(2010, 1, 1));
        assert_eq!(obs[0].temperature, -2.5);
        assert_eq!(obs[1].temperature, 15.0);
        assert_eq!(obs[3].season, Season::Summer);
        assert_eq!(loaded.frame().height(), 4);
        Ok(())
    }

    #[test]
    fn test_cities_in_first_appearance_order() -> Result<(), LoadError> {
        let loaded = ObservationFrame::from_csv_bytes(SAMPLE.as_bytes().to_vec())?;
        assert_eq!(loaded.cities(), vec!["Berlin".to_string(), "Cairo".to_string()]);
        let bounds = loaded.date_bounds().unwrap();
        assert_eq!(bounds.start, day(2010, 1, 1));
        assert_eq!(bounds.end, day(2010, 6, 1));
        Ok(())
    }

    #[test]
    fn test_input_season_is_trusted() -> Result<(), LoadError> {
        let csv = "city,timestamp,temperature,season\nRome,2011-07-01,30.0,winter\n";
        let loaded = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec())?;
        assert_eq!(loaded.observations()[0].season, Season::Winter);
        Ok(())
    }

    #[test]
    fn test_missing_season_column_is_derived() -> Result<(), LoadError> {
        let csv = "city,timestamp,temperature\nRome,2011-07-01 12:00:00,30.0\nRome,2011-10-01T06:30:00,18.0\n";
        let loaded = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec())?;
        let obs = loaded.observations();
        assert_eq!(obs[0].season, Season::Summer);
        assert_eq!(obs[1].season, Season::Autumn);
        assert_eq!(
            obs[1].timestamp,
            NaiveDate::from_ymd_opt(2011, 10, 1)
                .unwrap()
                .and_hms_opt(6, 30, 0)
                .unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_missing_temperature_becomes_nan() -> Result<(), LoadError> {
        let csv = "city,timestamp,temperature\nRome,2011-07-01,\nRome,2011-07-02,31.0\n";
        let loaded = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec())?;
        assert!(loaded.observations()[0].temperature.is_nan());
        assert_eq!(loaded.observations()[1].temperature, 31.0);
        Ok(())
    }

    #[test]
    fn test_non_numeric_temperature_is_rejected() {
        let csv = "city,timestamp,temperature\nRome,2011-07-01,abc\nRome,2011-07-02,31.0\n";
        let err = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColumnType { ref column, expected: "float", .. } if column == "temperature"
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "city,timestamp\nRome,2011-07-01\n";
        let err = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c, _) if c == "temperature"));
    }

    #[test]
    fn test_bad_timestamp_and_season() {
        let csv = "city,timestamp,temperature\nRome,yesterday,1.0\n";
        let err = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTimestamp { row: 0, .. }));

        let csv = "city,timestamp,temperature,season\nRome,2011-07-01,1.0,monsoon\n";
        let err = ObservationFrame::from_csv_bytes(csv.as_bytes().to_vec()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSeason { row: 0, .. }));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("2012-02-29"), Some(day(2012, 2, 29)));
        assert_eq!(
            parse_timestamp("2012-02-29 00:00:00.000"),
            Some(day(2012, 2, 29))
        );
        assert_eq!(parse_timestamp("2012-02-29T00:00:00Z"), Some(day(2012, 2, 29)));
        assert_eq!(parse_timestamp("29/02/2012"), None);
    }

    #[tokio::test]
    async fn test_from_path() -> Result<(), LoadError> {
        let mut file = NamedTempFile::new().map_err(|e| LoadError::FileRead("tmp".into(), e))?;
        file.write_all(SAMPLE.as_bytes())
            .map_err(|e| LoadError::FileRead(file.path().to_path_buf(), e))?;
        file.flush()
            .map_err(|e| LoadError::FileRead(file.path().to_path_buf(), e))?;

        let loaded = ObservationFrame::from_path(file.path()).await?;
        assert_eq!(loaded.observations().len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_from_missing_path() {
        let err = ObservationFrame::from_path(Path::new("/definitely/not/here.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::FileRead(..)));
    }
}
