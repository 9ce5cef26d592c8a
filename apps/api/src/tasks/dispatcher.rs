//! Task dispatcher — one prompt, one completion, one recovery step per request.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::llm_client::recovery::{recover_json, RecoveryError};
use crate::llm_client::{CompletionProvider, CompletionRequest, LlmError};
use crate::tasks::prompts::render_user_prompt;
use crate::tasks::{OutputFormat, Task};

/// Runs `task` against `provider` and returns the response `data` value.
pub async fn dispatch(
    provider: &dyn CompletionProvider,
    task: Task,
    data: &Value,
) -> Result<Value, AppError> {
    let profile = task.profile();
    let prompt = render_user_prompt(task, data).map_err(|e| {
        error!(%task, "{task} error: {e}");
        e
    })?;
    let request = CompletionRequest {
        system: profile.system.to_string(),
        prompt,
        temperature: profile.temperature,
        max_tokens: profile.max_tokens,
    };

    info!(%task, "Dispatching task");

    let text = match provider.complete(request).await {
        Ok(completion) => completion.text,
        Err(LlmError::EmptyContent) => {
            return Err(recovery_failure(task, RecoveryError::EmptyOutput));
        }
        Err(e) => {
            error!(%task, "{task} error: upstream failure: {e}");
            return Err(AppError::Upstream(e));
        }
    };

    match profile.output {
        OutputFormat::Json => recover_json(&text)
            .map(Value::Object)
            .map_err(|e| recovery_failure(task, e)),
        OutputFormat::PlainTitle => Ok(json!({ "title": clean_title(&text) })),
    }
}

fn recovery_failure(task: Task, source: RecoveryError) -> AppError {
    error!(%task, "{task} error: recovery failure: {source}");
    AppError::Recovery { task, source }
}

/// Trims the model's title and drops every double quote.
fn clean_title(text: &str) -> String {
    text.trim().replace('"', "")
}
