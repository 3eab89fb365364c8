// SQLite repository implementation
use crate::application::entry_repository::EntryRepository;
use crate::domain::weather_entry::{NewWeatherEntry, WeatherEntry};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;

const ENTRY_COLUMNS: &str = "id, location, date_range_start, date_range_end, \
     temperature, humidity, wind_speed, weather_description";

#[derive(Debug, FromRow)]
struct EntryRow {
    id: i64,
    location: String,
    date_range_start: NaiveDate,
    date_range_end: NaiveDate,
    temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    weather_description: Option<String>,
}

impl From<EntryRow> for WeatherEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            location: row.location,
            date_range_start: row.date_range_start,
            date_range_end: row.date_range_end,
            temperature: row.temperature,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            weather_description: row.weather_description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteEntryRepository {
    pool: SqlitePool,
}

impl SqliteEntryRepository {
    /// Open (creating if needed) the database at `url` and ensure the table exists.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url: {}", url))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connection
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to open SQLite database")?;

        let repository = Self { pool };
        repository.migrate().await?;
        Ok(repository)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weather_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                location TEXT NOT NULL,
                date_range_start TEXT NOT NULL,
                date_range_end TEXT NOT NULL,
                temperature REAL,
                humidity REAL,
                wind_speed REAL,
                weather_description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create weather_entries table")?;

        Ok(())
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepository {
    async fn list(&self) -> Result<Vec<WeatherEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {} FROM weather_entries ORDER BY id",
            ENTRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list weather entries")?;

        Ok(rows.into_iter().map(WeatherEntry::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<WeatherEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {} FROM weather_entries WHERE id = ?",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load weather entry {}", id))?;

        Ok(row.map(WeatherEntry::from))
    }

    async fn insert(&self, entry: NewWeatherEntry) -> Result<WeatherEntry> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            INSERT INTO weather_entries
                (location, date_range_start, date_range_end,
                 temperature, humidity, wind_speed, weather_description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        ))
        .bind(&entry.location)
        .bind(entry.date_range_start)
        .bind(entry.date_range_end)
        .bind(entry.metrics.temperature)
        .bind(entry.metrics.humidity)
        .bind(entry.metrics.wind_speed)
        .bind(&entry.metrics.weather_description)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert weather entry")?;

        Ok(row.into())
    }

    async fn update_dates(
        &self,
        id: i64,
        date_range_start: Option<NaiveDate>,
        date_range_end: Option<NaiveDate>,
    ) -> Result<Option<WeatherEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            r#"
            UPDATE weather_entries
            SET date_range_start = COALESCE(?, date_range_start),
                date_range_end = COALESCE(?, date_range_end)
            WHERE id = ?
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        ))
        .bind(date_range_start)
        .bind(date_range_end)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to update weather entry {}", id))?;

        Ok(row.map(WeatherEntry::from))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weather_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete weather entry {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weather_entry::WeatherMetrics;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_entry(location: &str) -> NewWeatherEntry {
        NewWeatherEntry::new(
            location.to_string(),
            date(2024, 5, 1),
            date(2024, 5, 3),
            WeatherMetrics {
                temperature: Some(291.4),
                humidity: Some(55.0),
                wind_speed: Some(2.5),
                weather_description: Some("clear sky".to_string()),
            },
        )
    }

    async fn repository() -> SqliteEntryRepository {
        SqliteEntryRepository::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = repository().await;

        let first = repo.insert(new_entry("Paris")).await.unwrap();
        let second = repo.insert(new_entry("Rome")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.location, "Paris");
        assert_eq!(first.date_range_start, date(2024, 5, 1));
        assert_eq!(first.temperature, Some(291.4));
        assert_eq!(first.weather_description.as_deref(), Some("clear sky"));
    }

    #[tokio::test]
    async fn test_missing_metrics_round_trip_as_none() {
        let repo = repository().await;
        let mut entry = new_entry("Reykjavik");
        entry.metrics = WeatherMetrics::default();

        let stored = repo.insert(entry).await.unwrap();
        let loaded = repo.get(stored.id).await.unwrap().unwrap();

        assert_eq!(loaded.temperature, None);
        assert_eq!(loaded.humidity, None);
        assert_eq!(loaded.wind_speed, None);
        assert_eq!(loaded.weather_description, None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = repository().await;
        for location in ["Paris", "Rome", "Berlin"] {
            repo.insert(new_entry(location)).await.unwrap();
        }

        let locations: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.location)
            .collect();
        assert_eq!(locations, vec!["Paris", "Rome", "Berlin"]);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let repo = repository().await;
        assert!(repo.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_dates_is_partial() {
        let repo = repository().await;
        let stored = repo.insert(new_entry("Paris")).await.unwrap();

        let updated = repo
            .update_dates(stored.id, None, Some(date(2024, 6, 30)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.date_range_start, date(2024, 5, 1));
        assert_eq!(updated.date_range_end, date(2024, 6, 30));
        assert_eq!(updated.temperature, stored.temperature);

        let updated = repo
            .update_dates(stored.id, Some(date(2024, 4, 1)), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.date_range_start, date(2024, 4, 1));
        assert_eq!(updated.date_range_end, date(2024, 6, 30));

        assert!(repo.update_dates(999, Some(date(2024, 1, 1)), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let stored = repo.insert(new_entry("Paris")).await.unwrap();

        assert!(repo.delete(stored.id).await.unwrap());
        assert!(!repo.delete(stored.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
