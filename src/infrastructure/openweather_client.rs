// OpenWeatherMap adapter for geocoding and point-in-time weather
use crate::application::weather_provider::{Geocoder, HistoricalWeather};
use crate::domain::coordinates::Coordinates;
use crate::infrastructure::config::OpenWeatherSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    geocoding_url: String,
    timemachine_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(settings: &OpenWeatherSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            geocoding_url: settings.geocoding_url.clone(),
            timemachine_url: settings.timemachine_url.clone(),
            http: Client::new(),
        }
    }

    async fn fetch_coordinates(&self, location: &str) -> Result<Option<Coordinates>> {
        tracing::debug!("Geocoding '{}' via {}", location, self.geocoding_url);

        let response = self
            .http
            .get(&self.geocoding_url)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send geocoding request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Geocoding request failed with status {}", status);
        }

        let matches = response
            .json::<Vec<Coordinates>>()
            .await
            .context("Failed to parse geocoding response")?;

        Ok(matches.into_iter().next())
    }

    async fn fetch_timemachine(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Result<serde_json::Value> {
        tracing::debug!(
            "Fetching weather at ({}, {}) dt={} via {}",
            coordinates.lat,
            coordinates.lon,
            timestamp,
            self.timemachine_url
        );

        let response = self
            .http
            .get(&self.timemachine_url)
            .query(&[
                ("appid", self.api_key.clone()),
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
                ("dt", timestamp.to_string()),
            ])
            .send()
            .await
            .context("Failed to send timemachine request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Timemachine request failed with status {}", status);
        }

        response
            .json::<serde_json::Value>()
            .await
            .context("Failed to parse timemachine response")
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn geocode(&self, location: &str) -> Option<Coordinates> {
        match self.fetch_coordinates(location).await {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                tracing::warn!("No geocoding match for '{}'", location);
                None
            }
            Err(e) => {
                tracing::warn!("Geocoding '{}' failed: {:#}", location, e);
                None
            }
        }
    }
}

#[async_trait]
impl HistoricalWeather for OpenWeatherClient {
    async fn weather_at(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Option<serde_json::Value> {
        self.fetch_timemachine(coordinates, timestamp)
            .await
            .map_err(|e| tracing::warn!("Weather lookup failed: {:#}", e))
            .ok()
    }
}
