use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use ecobin_core::domain::{Bin, StatusUpdate, StatusUpdateRequest};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::error::{ApiError, FETCH_BIN_FAILED, FETCH_HISTORY_FAILED, UPDATE_FAILED};
use super::state::AppState;

/// `PUT /bins/{id}/status` body.
///
/// `id` may be echoed by clients; the path id is the one that counts.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusBody {
    #[serde(default, rename = "id")]
    _id: Option<String>,
    #[serde(default)]
    status: Option<Value>,
}

impl StatusBody {
    /// Only a JSON object is a body. Arrays and scalars are malformed.
    fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(map) => serde_json::from_value(Value::Object(map)),
            other => Err(serde::de::Error::invalid_type(
                serde::de::Unexpected::Other(json_kind(&other)),
                &"a JSON object",
            )),
        }
    }

    /// Non-string values are kept as their JSON text so validation rejects them.
    fn status_text(self) -> Option<String> {
        match self.status {
            None | Some(Value::Null) => None,
            Some(Value::String(status)) => Some(status),
            Some(other) => Some(other.to_string()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "binId")]
    bin_id: Option<String>,
}

pub async fn update_status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Bin>, ApiError> {
    let Json(raw) = body.map_err(|rejection| {
        debug!(bin_id = %id, error = %rejection, "Rejected request body");
        ApiError::MalformedPayload
    })?;
    let body = StatusBody::from_json(raw).map_err(|e| {
        debug!(bin_id = %id, error = %e, "Rejected request body");
        ApiError::MalformedPayload
    })?;

    let request = StatusUpdateRequest {
        bin_id: id,
        status: body.status_text(),
    };

    let bin = state
        .app
        .status_updates
        .update_bin_status(request)
        .await
        .map_err(|e| ApiError::from_domain(e, UPDATE_FAILED))?;

    Ok(Json(bin))
}

pub async fn get_bin_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Bin>, ApiError> {
    let bin = state
        .app
        .queries
        .get_bin(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, FETCH_BIN_FAILED))?;

    Ok(Json(bin))
}

pub async fn status_updates_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<StatusUpdate>>, ApiError> {
    let bin_id = query.bin_id.unwrap_or_default();

    let records = state
        .app
        .queries
        .list_status_updates(&bin_id)
        .await
        .map_err(|e| ApiError::from_domain(e, FETCH_HISTORY_FAILED))?;

    Ok(Json(records))
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn fallback_handler() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
