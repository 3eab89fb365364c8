// Weather entry domain model
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted on input and emitted on output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column width of the free-text fields.
pub const MAX_TEXT_LEN: usize = 255;

/// A stored weather observation for a location and date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub id: i64,
    pub location: String,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub weather_description: Option<String>,
}

impl fmt::Display for WeatherEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather for {} from {} to {}",
            self.location, self.date_range_start, self.date_range_end
        )
    }
}

/// Metrics extracted from a point-in-time weather sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherMetrics {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub weather_description: Option<String>,
}

/// An entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherEntry {
    pub location: String,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
    pub metrics: WeatherMetrics,
}

impl NewWeatherEntry {
    pub fn new(
        location: String,
        date_range_start: NaiveDate,
        date_range_end: NaiveDate,
        metrics: WeatherMetrics,
    ) -> Self {
        Self {
            location,
            date_range_start,
            date_range_end,
            metrics,
        }
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_entry_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Unix timestamp of midnight UTC on `date`, used as the weather sample time.
pub fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
