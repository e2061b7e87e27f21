use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiveTemperatureError {
    #[error("Invalid API key while fetching '{city}'. Please see https://openweathermap.org/faq#error401 for more info.")]
    Authentication { city: String },

    #[error("Weather server returned status {status} for '{city}'")]
    Server {
        city: String,
        status: reqwest::StatusCode,
    },

    #[error("Network request failed for '{city}'")]
    Network {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response body for '{city}'")]
    InvalidResponse {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl LiveTemperatureError {
    /// An invalid credential: retrying other cities with the same key is pointless.
    pub fn is_authentication(&self) -> bool {
        matches!(self, LiveTemperatureError::Authentication { .. })
    }
}
