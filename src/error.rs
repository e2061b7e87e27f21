use crate::analysis::error::AnalysisError;
use crate::live::error::LiveTemperatureError;
use crate::observations::error::LoadError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    LiveTemperature(#[from] LiveTemperatureError),

    #[error("Failed to build result frame")]
    Frame(#[from] PolarsError),
}
