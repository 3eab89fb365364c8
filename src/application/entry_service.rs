// Entry service - Use cases for creating, updating and reading weather entries
use crate::application::entry_repository::EntryRepository;
use crate::application::errors::{EntryError, EntryResult};
use crate::application::weather_provider::{Geocoder, HistoricalWeather};
use crate::domain::weather_entry::{
    midnight_timestamp, parse_entry_date, NewWeatherEntry, WeatherEntry, WeatherMetrics,
    MAX_TEXT_LEN,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Body of a create request. Fields are optional so that a missing one
/// is reported as a validation error rather than a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEntryInput {
    pub location: Option<String>,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
}

/// Body of an update request. Only the dates are writable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryInput {
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimemachineResponse {
    data: Vec<TimemachineSample>,
}

#[derive(Debug, Deserialize)]
struct TimemachineSample {
    temp: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    weather: Vec<TimemachineCondition>,
}

#[derive(Debug, Deserialize)]
struct TimemachineCondition {
    description: Option<String>,
}

#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn HistoricalWeather>,
}

impl EntryService {
    pub fn new(
        repository: Arc<dyn EntryRepository>,
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn HistoricalWeather>,
    ) -> Self {
        Self {
            repository,
            geocoder,
            weather,
        }
    }

    /// Geocode the location, sample the weather at the start date and persist
    /// the result. Nothing is written unless every step succeeds.
    pub async fn create(&self, input: CreateEntryInput) -> EntryResult<WeatherEntry> {
        let (Some(location), Some(start), Some(end)) = (
            non_empty(input.location),
            non_empty(input.date_range_start),
            non_empty(input.date_range_end),
        ) else {
            return Err(EntryError::Validation("All fields are required".to_string()));
        };

        if location.chars().count() > MAX_TEXT_LEN {
            return Err(EntryError::Validation(format!(
                "location must be at most {} characters",
                MAX_TEXT_LEN
            )));
        }

        let date_range_start = parse_date("date_range_start", &start)?;
        let date_range_end = parse_date("date_range_end", &end)?;

        let coordinates = self
            .geocoder
            .geocode(&location)
            .await
            .ok_or(EntryError::Fetch)?;

        let payload = self
            .weather
            .weather_at(coordinates, midnight_timestamp(date_range_start))
            .await
            .ok_or(EntryError::Fetch)?;

        let metrics = extract_metrics(payload)?;
        let entry = self
            .repository
            .insert(NewWeatherEntry::new(
                location,
                date_range_start,
                date_range_end,
                metrics,
            ))
            .await?;

        tracing::info!("Created entry {}: {}", entry.id, entry);
        Ok(entry)
    }

    /// Overwrite the dates that are present; metrics are never re-fetched.
    pub async fn update(&self, id: i64, input: UpdateEntryInput) -> EntryResult<WeatherEntry> {
        let date_range_start = non_empty(input.date_range_start)
            .map(|value| parse_date("date_range_start", &value))
            .transpose()?;
        let date_range_end = non_empty(input.date_range_end)
            .map(|value| parse_date("date_range_end", &value))
            .transpose()?;

        self.repository
            .update_dates(id, date_range_start, date_range_end)
            .await?
            .ok_or(EntryError::NotFound(id))
    }

    pub async fn list(&self) -> EntryResult<Vec<WeatherEntry>> {
        Ok(self.repository.list().await?)
    }

    pub async fn get(&self, id: i64) -> EntryResult<WeatherEntry> {
        self.repository
            .get(id)
            .await?
            .ok_or(EntryError::NotFound(id))
    }

    pub async fn delete(&self, id: i64) -> EntryResult<()> {
        if self.repository.delete(id).await? {
            tracing::info!("Deleted entry {}", id);
            Ok(())
        } else {
            Err(EntryError::NotFound(id))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> EntryResult<NaiveDate> {
    parse_entry_date(value).map_err(|_| EntryError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Pull the first sample's metrics and the first condition's description.
fn extract_metrics(payload: serde_json::Value) -> EntryResult<WeatherMetrics> {
    let response: TimemachineResponse = serde_json::from_value(payload)
        .map_err(|e| EntryError::UnexpectedPayload(e.to_string()))?;

    let sample = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| EntryError::UnexpectedPayload("empty data array".to_string()))?;

    let condition = sample
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| EntryError::UnexpectedPayload("empty weather array".to_string()))?;

    Ok(WeatherMetrics {
        temperature: sample.temp,
        humidity: sample.humidity,
        wind_speed: sample.wind_speed,
        weather_description: condition.description,
    })
}
