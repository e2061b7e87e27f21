use crate::types::season::UnknownSeason;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read observation file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV observation data")]
    CsvParse(#[source] PolarsError),

    #[error("Required column '{0}' not found")]
    MissingColumn(String, #[source] PolarsError),

    #[error("Column '{column}' could not be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Missing value in required column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Unparseable timestamp '{value}' at row {row}")]
    InvalidTimestamp { value: String, row: usize },

    #[error("Invalid season at row {row}")]
    InvalidSeason {
        row: usize,
        #[source]
        source: UnknownSeason,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
