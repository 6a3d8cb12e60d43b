//! Current-conditions lookup against an OpenWeatherMap-compatible endpoint.
//!
//! A single pass-through request: the coordinates come from the caller and the
//! credential is injected from configuration.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::config::WeatherConfig;
use crate::http::{build_client, default_headers, upstream_message};
use crate::{Error, Result};

/// Main readings block (`main` in the upstream payload)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Readings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Weather record as returned upstream; unknown fields are preserved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<Readings>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherReport {
    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    /// First reported condition, if any
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.request_timeout_secs)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    /// Build the request URL for a coordinate pair
    pub fn request_url(&self, lat: f64, lon: f64) -> Result<Url> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::Other(format!(
                "Coordinates out of range: lat={}, lon={}",
                lat, lon
            )));
        }

        let lat = lat.to_string();
        let lon = lon.to_string();
        let mut params = vec![("lat", lat.as_str()), ("lon", lon.as_str())];
        if let Some(ref key) = self.api_key {
            params.push(("appid", key.as_str()));
        }
        params.push(("units", self.units.as_str()));

        Ok(Url::parse_with_params(&self.base_url, &params)?)
    }

    /// Fetch current conditions at a coordinate pair
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        let url = self.request_url(lat, lon)?;

        tracing::info!(lat, lon, "Fetching current weather");

        let response = self
            .client
            .get(url)
            .headers(default_headers())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
