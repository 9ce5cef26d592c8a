use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::recovery::RecoveryError;
use crate::llm_client::LlmError;
use crate::tasks::Task;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unknown task. Use: {}", Task::identifiers())]
    UnknownTask(String),

    #[error("Failed to build {task} request: {message}")]
    TaskData { task: Task, message: String },

    #[error("{0}")]
    Upstream(#[from] LlmError),

    #[error("Failed to parse {task} response: {source}")]
    Recovery { task: Task, source: RecoveryError },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::UnknownTask(_) => StatusCode::BAD_REQUEST,
            AppError::TaskData { .. } | AppError::Upstream(_) | AppError::Recovery { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::UnknownTask(task) = &self {
            tracing::warn!("Unknown task requested: {task:?}");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
