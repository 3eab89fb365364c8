// Ports for the remote geocoding and weather lookups
use crate::domain::coordinates::Coordinates;
use async_trait::async_trait;

/// Resolves a free-text location to coordinates.
///
/// Every failure (transport, non-success status, empty result) is `None`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, location: &str) -> Option<Coordinates>;
}

/// Point-in-time weather lookup returning the provider's raw payload.
#[async_trait]
pub trait HistoricalWeather: Send + Sync {
    async fn weather_at(&self, coordinates: Coordinates, timestamp: i64)
        -> Option<serde_json::Value>;
}
