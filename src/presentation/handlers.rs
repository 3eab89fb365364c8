// HTTP request handlers
use crate::application::entry_service::{CreateEntryInput, UpdateEntryInput};
use crate::application::errors::{EntryError, EntryResult};
use crate::domain::weather_entry::WeatherEntry;
use crate::infrastructure::export::{entries_to_csv, entries_to_json, CSV_FILENAME};
use crate::infrastructure::http_response::{csv_attachment_response, json_bytes_response};
use crate::presentation::app_state::AppState;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Entry id taken from the `{id}` path segment. A segment that is not an
/// integer names no entry, so it is rejected as not found.
pub struct EntryId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntryId
where
    S: Send + Sync,
{
    type Rejection = EntryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| EntryError::Validation(e.body_text()))?;

        raw.parse().map(EntryId).map_err(|_| EntryError::UnknownId(raw))
    }
}

/// Unwrap a JSON body. A request without a JSON body counts as one with no
/// fields; a body that does not deserialize is a validation error.
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> EntryResult<T> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(EntryError::Validation(rejection.body_text())),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all entries
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WeatherEntry>>, EntryError> {
    Ok(Json(state.entry_service.list().await?))
}

/// Create an entry from a remote weather lookup
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEntryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<WeatherEntry>), EntryError> {
    let input = json_body(payload)?;
    let entry = state.entry_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_entry(
    EntryId(id): EntryId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeatherEntry>, EntryError> {
    Ok(Json(state.entry_service.get(id).await?))
}

/// Shared by PUT and PATCH; only the dates are writable
pub async fn update_entry(
    EntryId(id): EntryId,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateEntryInput>, JsonRejection>,
) -> Result<Json<WeatherEntry>, EntryError> {
    let input = json_body(payload)?;
    Ok(Json(state.entry_service.update(id, input).await?))
}

pub async fn delete_entry(
    EntryId(id): EntryId,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, EntryError> {
    state.entry_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dump all entries as a JSON array
pub async fn export_json(State(state): State<Arc<AppState>>) -> Result<Response, EntryError> {
    let entries = state.entry_service.list().await?;
    let body = entries_to_json(&entries)?;
    Ok(json_bytes_response(body).into_response())
}

/// Dump all entries as a CSV attachment
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response, EntryError> {
    let entries = state.entry_service.list().await?;
    let body = entries_to_csv(&entries)?;
    Ok(csv_attachment_response(body, CSV_FILENAME).into_response())
}
