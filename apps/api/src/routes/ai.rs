//! Axum handlers for the task endpoint.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tasks::dispatcher::dispatch;
use crate::tasks::Task;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The inbound `{ task, data }` body.
#[derive(Debug, PartialEq)]
pub struct TaskRequest {
    pub task: String,
    pub data: Value,
}

impl TaskRequest {
    /// Reads the body as JSON regardless of `Content-Type`. A body that is not a
    /// JSON object, or a `task` that is not a string, leaves the task empty so it
    /// is reported as an unknown task.
    pub fn from_body(body: &[u8]) -> Self {
        let value = serde_json::from_slice::<Value>(body).unwrap_or_else(|e| {
            debug!("Request body is not JSON: {e}");
            Value::Null
        });

        Self {
            task: value
                .get("task")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            data: value.get("data").cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub data: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai
///
/// Routes the body's `task` to exactly one generation task and returns its result.
pub async fn handle_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TaskResponse>, AppError> {
    let request = TaskRequest::from_body(&body);

    let task: Task = request.task.parse()?;
    let data = dispatch(state.llm.as_ref(), task, &request.data).await?;

    Ok(Json(TaskResponse {
        success: true,
        data,
    }))
}

/// OPTIONS /api/ai
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/ai.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
