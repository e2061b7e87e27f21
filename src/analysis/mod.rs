pub mod anomaly;
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod rolling;
pub mod trend;
