use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::paste::unix_now;
use crate::storage::{PasteSummary, ADMIN_LIST_LIMIT};

pub async fn list_pastes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PasteSummary>>, ApiError> {
    Ok(Json(state.store.list_recent(ADMIN_LIST_LIMIT).await?))
}

pub async fn delete_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.delete(&id).await?;
    tracing::info!(paste_id = %id, removed, "Admin delete");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn purge_expired(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let purged = state.store.purge_expired(unix_now()).await?;
    metrics::record_purged(purged);
    tracing::info!(purged, "Admin purge");
    Ok(StatusCode::NO_CONTENT)
}
