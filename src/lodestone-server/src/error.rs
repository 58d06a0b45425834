//! Caller-visible failures.
//!
//! Every failure reaches the client as `{error, details}`: `error` is a
//! stable label naming the operation, `details` the human-readable cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lodestone_store::{collections, StoreError};
use serde::Serialize;
use utoipa::ToSchema;

/// Label for generation failures
pub const GENERATE_FAILED: &str = "Failed to generate list";

/// Label for hub listing failures
pub const LIST_HUBS_FAILED: &str = "Failed to fetch resource hubs";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource hub not found: {0}")]
    HubNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { collection, id } if collection == collections::RESOURCE_HUBS => {
                Self::HubNotFound(id)
            }
            other => Self::Store(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::HubNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the operation label shown to callers
    pub fn labeled(self, label: &'static str) -> ApiFailure {
        ApiFailure { label, error: self }
    }
}

/// An [`ApiError`] with its operation label, ready to send
#[derive(Debug)]
pub struct ApiFailure {
    pub label: &'static str,
    pub error: ApiError,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "{}", self.label);
        } else {
            tracing::warn!(error = %self.error, "{}", self.label);
        }

        let body = ErrorResponse {
            error: self.label.to_string(),
            details: self.error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
