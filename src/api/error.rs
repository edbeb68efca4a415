use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::analyzer::AnalysisError;
use crate::db::StoreError;
use crate::middleware::AuthError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("Audit not found")]
    NotFound,
}

impl ApiError {
    /// Wrap a storage failure with the operation it interrupted
    pub fn persistence(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Persistence { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingUrl
            | ApiError::InvalidRequest(_)
            | ApiError::Analysis(_)
            | ApiError::Persistence { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Analysis(_) | ApiError::Persistence { .. } => {
                tracing::error!("Request failed: {}", self);
            }
            _ => tracing::debug!("Request rejected: {}", self),
        }

        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(AuthError::InvalidSession).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AnalysisError::Timeout(Duration::from_secs(10))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn persistence_message_wraps_storage_error() {
        let err = ApiError::persistence("Failed to save audit")(StoreError::Corrupt(
            "bad grade".to_string(),
        ));
        assert_eq!(err.to_string(), "Failed to save audit: corrupt audit row: bad grade");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn analysis_message_carries_upstream_status() {
        let err = ApiError::from(AnalysisError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to analyze URL: HTTP 503: Service Unavailable"
        );
    }
}
