//! Profile record handlers
//!
//! CRUD over the shared personnel roster. Every route here sits behind the
//! access gate; an unauthenticated call never reaches these handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use roster_core::{ProfileRecord, ProfileRecordDraft};

use crate::error::AppError;
use crate::state::AppState;

/// Request body for creating or replacing a profile record
///
/// All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,

    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,

    #[validate(length(min = 1, message = "authority is required"))]
    pub authority: String,
}

impl From<RecordPayload> for ProfileRecordDraft {
    fn from(payload: RecordPayload) -> Self {
        ProfileRecordDraft {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            date_of_birth: payload.date_of_birth,
            status: payload.status,
            authority: payload.authority,
        }
    }
}

/// Single-record response
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordResponse {
    pub success: bool,
    pub message: String,
    pub data: ProfileRecord,
}

/// Record list response
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordListResponse {
    pub success: bool,
    pub data: Vec<ProfileRecord>,
}

/// Deletion response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Query parameters for record listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecordsQuery {
    /// Maximum records to return
    #[param(default = 50)]
    pub limit: Option<i64>,

    /// Records to skip
    #[param(default = 0)]
    pub offset: Option<i64>,
}

/// Add a profile record to the roster
#[utoipa::path(
    post,
    path = "/api/v1/records",
    tag = "records",
    request_body = RecordPayload,
    responses(
        (status = 201, description = "Record added", body = RecordResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ApiError),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.records.create_record(&payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            success: true,
            message: "Record added!".to_string(),
            data: record,
        }),
    ))
}

/// List profile records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "records",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Record list", body = RecordListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListRecordsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let records = state.records.list_records(limit, offset).await?;

    Ok(Json(RecordListResponse {
        success: true,
        data: records,
    }))
}

/// Replace a profile record
#[utoipa::path(
    put,
    path = "/api/v1/records/{id}",
    tag = "records",
    params(("id" = Uuid, Path, description = "Record id")),
    request_body = RecordPayload,
    responses(
        (status = 200, description = "Record updated", body = RecordResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ApiError),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "Record not found", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state
        .records
        .update_record(id, &payload.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    Ok(Json(RecordResponse {
        success: true,
        message: "Record updated.".to_string(),
        data: record,
    }))
}

/// Delete a profile record
#[utoipa::path(
    delete,
    path = "/api/v1/records/{id}",
    tag = "records",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "Record not found", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.records.delete_record(id).await?;

    if !deleted {
        return Err(AppError::NotFound("Record not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Record deleted".to_string(),
    }))
}
