// Repository trait for weather entry persistence
use crate::domain::weather_entry::{NewWeatherEntry, WeatherEntry};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All entries in store order (ascending id)
    async fn list(&self) -> anyhow::Result<Vec<WeatherEntry>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<WeatherEntry>>;

    /// Insert a new row and return it with its assigned id
    async fn insert(&self, entry: NewWeatherEntry) -> anyhow::Result<WeatherEntry>;

    /// Overwrite whichever dates are given; `None` if the id is unknown
    async fn update_dates(
        &self,
        id: i64,
        date_range_start: Option<NaiveDate>,
        date_range_end: Option<NaiveDate>,
    ) -> anyhow::Result<Option<WeatherEntry>>;

    /// Returns false if nothing was deleted
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
