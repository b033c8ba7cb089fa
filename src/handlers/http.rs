use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use crate::handlers::AppState;
use crate::store::StoreError;

fn error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Thin HTTP handler: full storage-key -> payload mapping
pub async fn list_players(State(state): State<AppState>) -> Json<BTreeMap<String, Value>> {
    let store = state.store.read().await;
    log::debug!("HTTP: returning {} player records", store.len());
    Json(store.all())
}

/// Thin HTTP handler: single payload by friendly key
pub async fn get_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let store = state.store.read().await;
    match store.get(&key) {
        Some(payload) => Ok(Json(payload.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("no player record for key '{key}'"),
        )),
    }
}

/// Thin HTTP handler: insert or replace a payload
pub async fn put_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match store.set(&key, payload) {
        Ok(changed) => {
            if changed {
                log::info!("Stored player record for '{key}'");
            }
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            log::error!("Failed to store player record for '{key}': {e}");
            Err((error_status(&e), e.to_string()))
        }
    }
}

/// Thin HTTP handler: delete by friendly key. Success is 204; failures carry
/// a plain-text reason so callers can surface it.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.store.write().await;
    match store.delete(&key) {
        Ok(()) => {
            log::info!("Deleted player record for '{key}'");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            log::warn!("Delete failed for '{key}': {e}");
            Err((error_status(&e), e.to_string()))
        }
    }
}
