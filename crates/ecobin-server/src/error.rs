use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ecobin_core::domain::DomainError;
use serde_json::json;
use thiserror::Error;

pub const UPDATE_FAILED: &str = "Error updating bin status";
pub const FETCH_BIN_FAILED: &str = "Error fetching bin";
pub const FETCH_HISTORY_FAILED: &str = "Error fetching status updates";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid request body")]
    MalformedPayload,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// `context` is the client-facing message used when the store fails.
    pub fn from_domain(err: DomainError, context: &'static str) -> Self {
        match err {
            DomainError::InvalidRequest(message) => ApiError::InvalidRequest(message),
            DomainError::NotFound(message) => ApiError::NotFound(message),
            DomainError::StoreUnavailable(detail) => ApiError::Internal {
                message: context,
                detail,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MalformedPayload | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            ApiError::Internal { message, detail } => json!({ "message": message, "error": detail }),
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
