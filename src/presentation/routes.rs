// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_entry, delete_entry, export_csv, export_json, get_entry, health_check, list_entries,
    update_entry,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/weather/", get(list_entries).post(create_entry))
        .route("/weather/export/json/", get(export_json))
        .route("/weather/export/csv/", get(export_csv))
        .route(
            "/weather/:id/",
            get(get_entry)
                .put(update_entry)
                .patch(update_entry)
                .delete(delete_entry),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
