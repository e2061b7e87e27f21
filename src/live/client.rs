//! Current temperature from the OpenWeatherMap current-weather endpoint.

use crate::live::error::LiveTemperatureError;
use bon::bon;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A source of current temperatures, keyed by city name.
pub trait TemperatureSource {
    /// Returns the current temperature in degrees Celsius, rounded to two decimals.
    fn current_temperature(
        &self,
        api_key: &str,
        city: &str,
    ) -> impl Future<Output = Result<f64, LiveTemperatureError>> + Send;
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// HTTP client for the current-weather endpoint, in metric units.
///
/// # Examples
///
/// ```no_run
/// # use climate_profile::{LiveTemperatureError, OpenWeatherClient, TemperatureSource};
/// # #[tokio::main]
/// # async fn main() -> Result<(), LiveTemperatureError> {
/// let client = OpenWeatherClient::builder().build()?;
/// let temperature = client.current_temperature("my-api-key", "Berlin").await?;
/// println!("Berlin is at {} degrees Celsius", temperature);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    http: Client,
}

#[bon]
impl OpenWeatherClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. Endpoint URL. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request timeout. Defaults to 10 seconds. Ignored when `.http` is given.
    /// * `.http(reqwest::Client)`: Optional. A preconfigured HTTP client.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
        http: Option<Client>,
    ) -> Result<Self, LiveTemperatureError> {
        let http = match http {
            Some(client) => client,
            None => Client::builder()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .map_err(LiveTemperatureError::ClientBuild)?,
        };
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http,
        })
    }

    async fn fetch(&self, api_key: &str, city: &str) -> Result<f64, LiveTemperatureError> {
        info!("Fetching current temperature for {}", city);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|source| LiveTemperatureError::Network {
                city: city.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => {
                return Err(LiveTemperatureError::Authentication {
                    city: city.to_string(),
                })
            }
            status => {
                warn!("Server returned status {} for {}", status, city);
                return Err(LiveTemperatureError::Server {
                    city: city.to_string(),
                    status,
                });
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LiveTemperatureError::Network {
                city: city.to_string(),
                source,
            })?;
        let weather: CurrentWeather =
            serde_json::from_slice(&body).map_err(|source| LiveTemperatureError::InvalidResponse {
                city: city.to_string(),
                source,
            })?;
        Ok(round_to_hundredths(weather.main.temp))
    }
}

impl TemperatureSource for OpenWeatherClient {
    async fn current_temperature(
        &self,
        api_key: &str,
        city: &str,
    ) -> Result<f64, LiveTemperatureError> {
        self.fetch(api_key, city).await
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
