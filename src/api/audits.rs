use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ApiError, AppState};
use crate::middleware::require_user_from_headers;
use crate::models::{AuditRecord, NewAudit};

/// Upper bound on a single history page
const MAX_HISTORY_LIMIT: i64 = 100;

// ============================================
// Request/Response Types
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// Target page, with or without scheme
    #[serde(default)]
    #[validate(length(min = 1))]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

// ============================================
// Handlers
// ============================================

/// Analyze a URL and store the scored audit
///
/// **Auth: Session Required**
pub async fn analyze_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AuditRecord>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    req.validate().map_err(|_| ApiError::MissingUrl)?;

    let user = require_user_from_headers(state.identity.as_ref(), &headers).await?;

    let report = state.analyzer.analyze(&req.url).await?;

    let record = state
        .store
        .insert(NewAudit {
            user_id: user.user_id,
            url: req.url,
            report,
        })
        .await
        .map_err(ApiError::persistence("Failed to save audit"))?;

    tracing::info!(
        audit_id = %record.id,
        url = %record.url,
        overall_score = record.report.scores.overall_score,
        duration_ms = record.report.stats.scan_duration_ms,
        "Audit completed"
    );

    Ok(Json(record))
}

/// List the caller's audits, newest first
///
/// **Auth: Session Required**
pub async fn list_audits(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let user = require_user_from_headers(state.identity.as_ref(), &headers).await?;

    let limit = params
        .limit
        .unwrap_or(state.history_limit)
        .clamp(1, MAX_HISTORY_LIMIT);

    let audits = state
        .store
        .list_recent(&user.user_id, limit)
        .await
        .map_err(ApiError::persistence("Failed to load audit history"))?;

    Ok(Json(audits))
}

/// Fetch a single audit owned by the caller
///
/// **Auth: Session Required**
pub async fn get_audit(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AuditRecord>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let user = require_user_from_headers(state.identity.as_ref(), &headers).await?;

    state
        .store
        .get(&user.user_id, id)
        .await
        .map_err(ApiError::persistence("Failed to load audit"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Permanently delete an audit owned by the caller
///
/// **Auth: Session Required**
pub async fn delete_audit(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let user = require_user_from_headers(state.identity.as_ref(), &headers).await?;

    let deleted = state
        .store
        .delete(&user.user_id, id)
        .await
        .map_err(ApiError::persistence("Failed to delete audit"))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    tracing::info!(audit_id = %id, "Audit deleted");
    Ok(Json(DeleteResponse { success: true }))
}
