//! HTTP request handlers for the log API.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use hive_logs::{LogRecord, NewLogRecord, RecordFilter, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Query parameters for record listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Filter by exact service name.
    pub service: Option<String>,
    /// Filter by exact severity label.
    pub level: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<i64>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

/// Deletion confirmation response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Status message.
    pub status: String,
    /// Identifier of the deleted record.
    pub id: u64,
}

/// Handle GET /health - health check endpoint.
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Handle POST /v1/logs - ingest a log record.
pub async fn ingest_record(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<NewLogRecord>, JsonRejection>,
) -> ApiResult<Json<LogRecord>> {
    let Json(new) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let record = state.service().create(new)?;
    Ok(Json(record))
}

/// Handle GET /v1/logs - list records, newest first.
pub async fn list_records(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LogRecord>>> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let filter = RecordFilter {
        service: query.service,
        level: query.level,
    };
    let records = state.service().list(filter, query.limit)?;
    Ok(Json(records))
}

/// Handle GET /v1/logs/{id} - fetch a single record.
pub async fn get_record(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LogRecord>> {
    let id = RecordId::parse(&id)?;
    let record = state.service().get(id)?;
    Ok(Json(record))
}

/// Handle DELETE /v1/logs/{id} - delete a record.
pub async fn delete_record(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = RecordId::parse(&id)?;
    state.service().delete(id)?;
    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        id: id.0,
    }))
}
