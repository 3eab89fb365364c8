// Export emitters - Serialize all entries to JSON and CSV
use crate::domain::weather_entry::WeatherEntry;
use anyhow::{Context, Result};

pub const CSV_HEADER: [&str; 8] = [
    "ID",
    "Location",
    "Date Range Start",
    "Date Range End",
    "Temperature",
    "Humidity",
    "Wind Speed",
    "Weather Description",
];

pub const CSV_FILENAME: &str = "weather_entries.csv";

/// Serialize entries as a JSON array of full records.
pub fn entries_to_json(entries: &[WeatherEntry]) -> Result<Vec<u8>> {
    serde_json::to_vec(entries).context("Failed to serialize entries to JSON")
}

/// Serialize entries as CSV with a fixed header row. Absent values are empty cells.
pub fn entries_to_csv(entries: &[WeatherEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for entry in entries {
        writer
            .write_record([
                entry.id.to_string(),
                entry.location.clone(),
                entry.date_range_start.to_string(),
                entry.date_range_end.to_string(),
                optional_cell(entry.temperature),
                optional_cell(entry.humidity),
                optional_cell(entry.wind_speed),
                entry.weather_description.clone().unwrap_or_default(),
            ])
            .with_context(|| format!("Failed to write CSV row for entry {}", entry.id))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
}

/// Metrics are float columns, so whole numbers keep one decimal (`40.0`),
/// matching how they appear in the JSON export.
fn optional_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
