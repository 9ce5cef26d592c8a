//! `data` payloads for each task, as sent by the browser client (camelCase keys).
//!
//! Reading is lenient: an absent text field renders as `undefined` and non-string
//! scalars render as their literal text. A list field that holds something other
//! than a list is the only failure.

use serde_json::Value;

use crate::errors::AppError;
use crate::tasks::Task;

const ABSENT: &str = "undefined";
const NO_ITEMS: &str = "none";

#[derive(Debug)]
pub struct SelectTopicInput {
    /// Comma-separated, or "none".
    pub used_topics: String,
}

#[derive(Debug)]
pub struct RewriteContentInput {
    pub topic: String,
    /// Comma-separated, or "none".
    pub keywords: String,
    pub target_audience: String,
    pub chapter5_title: String,
}

#[derive(Debug)]
pub struct AnalyzeColorsInput {
    pub accent_color: String,
    pub color_mood: String,
    pub topic: String,
}

#[derive(Debug)]
pub struct PinterestTitleInput {
    pub topic: String,
    pub target_audience: String,
}

impl SelectTopicInput {
    pub fn from_data(data: &Value) -> Result<Self, AppError> {
        let fields = Fields::new(Task::SelectTopic, data);
        Ok(Self {
            used_topics: fields.list("usedTopics")?,
        })
    }
}

impl RewriteContentInput {
    pub fn from_data(data: &Value) -> Result<Self, AppError> {
        let fields = Fields::new(Task::RewriteContent, data);
        Ok(Self {
            topic: fields.text("topic"),
            keywords: fields.list("keywords")?,
            target_audience: fields.text("targetAudience"),
            chapter5_title: fields.text("chapter5Title"),
        })
    }
}

impl AnalyzeColorsInput {
    pub fn from_data(data: &Value) -> Self {
        let fields = Fields::new(Task::AnalyzeColors, data);
        Self {
            accent_color: fields.text("accentColor"),
            color_mood: fields.text("colorMood"),
            topic: fields.text("topic"),
        }
    }
}

impl PinterestTitleInput {
    pub fn from_data(data: &Value) -> Self {
        let fields = Fields::new(Task::PinterestTitle, data);
        Self {
            topic: fields.text("topic"),
            target_audience: fields.text("targetAudience"),
        }
    }
}

/// Field access over a task's `data`. Anything that is not an object has no fields.
struct Fields<'a> {
    task: Task,
    data: &'a Value,
}

impl<'a> Fields<'a> {
    fn new(task: Task, data: &'a Value) -> Self {
        Self { task, data }
    }

    fn text(&self, key: &str) -> String {
        self.data
            .get(key)
            .map(display_value)
            .unwrap_or_else(|| ABSENT.to_string())
    }

    fn list(&self, key: &str) -> Result<String, AppError> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(NO_ITEMS.to_string()),
            Some(Value::Array(items)) if items.is_empty() => Ok(NO_ITEMS.to_string()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .map(display_value)
                .collect::<Vec<_>>()
                .join(", ")),
            Some(other) => Err(AppError::TaskData {
                task: self.task,
                message: format!("`{key}` must be a list, got {other}"),
            }),
        }
    }
}

/// Renders a JSON value the way it reads inside a prompt.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}
