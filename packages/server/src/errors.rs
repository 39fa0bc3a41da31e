use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_editor::{EditorError, MutationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Body returned by the action routes
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            version: None,
            changed: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            version: None,
            changed: None,
            error: Some(error.into()),
        }
    }
}

/// Editor errors and malformed request bodies as HTTP responses
pub enum ApiError {
    Editor(EditorError),
    BadRequest(String),
}

impl From<EditorError> for ApiError {
    fn from(err: EditorError) -> Self {
        ApiError::Editor(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Editor(err) => err,
            ApiError::BadRequest(message) => {
                tracing::debug!(error = %message, "malformed request body");
                return (StatusCode::BAD_REQUEST, Json(ActionResponse::failure(message)))
                    .into_response();
            }
        };

        let status = match &err {
            EditorError::Mutation(MutationError::InvalidUrl { .. }) | EditorError::Invalid(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EditorError::Mutation(_) | EditorError::NotALinesBlock { .. } => StatusCode::BAD_REQUEST,
            EditorError::DragInProgress | EditorError::NoDragInProgress => StatusCode::CONFLICT,
            EditorError::Model(_) | EditorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "editor request failed");
        } else {
            tracing::debug!(error = %err, %status, "editor request rejected");
        }

        (status, Json(ActionResponse::failure(err.to_string()))).into_response()
    }
}
