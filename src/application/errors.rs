// Error kinds surfaced by the entry use cases
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Could not fetch weather data")]
    Fetch,

    #[error("Weather entry {0} not found")]
    NotFound(i64),

    /// Path segment that cannot name an entry, e.g. `/weather/abc/`
    #[error("Weather entry {0} not found")]
    UnknownId(String),

    #[error("Unexpected weather payload: {0}")]
    UnexpectedPayload(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type EntryResult<T> = Result<T, EntryError>;
