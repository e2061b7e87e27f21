mod analysis;
mod analyzer;
mod error;
mod filtering;
mod frames;
mod live;
mod observations;
mod types;

pub use analyzer::*;
pub use error::ClimateError;
pub use filtering::EnrichedFrameFilterExt;

pub use analysis::anomaly::{is_anomaly, is_deviation_anomaly};
pub use analysis::error::{AnalysisError, EmptyStage};
pub use analysis::pipeline::TemperatureAnalysis;
pub use analysis::profile::{city_profiles, season_profiles};
pub use analysis::rolling::{rolling_stats, RollingStats};
pub use analysis::trend::{fit_trend, Trend, TrendDirection, TrendFit};

pub use observations::error::LoadError;
pub use observations::loader::ObservationFrame;

pub use live::client::{OpenWeatherClient, TemperatureSource, DEFAULT_BASE_URL};
pub use live::error::LiveTemperatureError;
pub use live::gather::{compare_to_season_norm, fetch_current_temperatures, LiveReadings, NormComparison};

pub use types::date_range::{DateRange, IntoTimestamp};
pub use types::observation::{EnrichedObservation, Observation};
pub use types::profile::{CityProfile, SeasonProfile, TemperatureStats};
pub use types::season::{Season, UnknownSeason};
