//! Task catalogue: the four single-shot generation tasks the endpoint serves.
//! Each task is one prompt, one completion call, one recovery step.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

pub mod dispatcher;
pub mod inputs;
pub mod prompts;

/// A supported task identifier. Matched exactly against the request's `task` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SelectTopic,
    RewriteContent,
    AnalyzeColors,
    PinterestTitle,
}

/// How the model's text is turned into the response `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lenient JSON recovery into an object.
    Json,
    /// Trimmed, quote-free text returned as `{ "title": ... }`.
    PlainTitle,
}

/// Static generation settings for a task.
#[derive(Debug, Clone, Copy)]
pub struct TaskProfile {
    pub system: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
    pub output: OutputFormat,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::SelectTopic,
        Task::RewriteContent,
        Task::AnalyzeColors,
        Task::PinterestTitle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Task::SelectTopic => "select-topic",
            Task::RewriteContent => "rewrite-content",
            Task::AnalyzeColors => "analyze-colors",
            Task::PinterestTitle => "pinterest-title",
        }
    }

    /// Comma-separated list of every valid identifier, for error messages.
    pub fn identifiers() -> String {
        Task::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn profile(self) -> TaskProfile {
        match self {
            Task::SelectTopic => TaskProfile {
                system: prompts::SELECT_TOPIC_SYSTEM,
                temperature: 0.8,
                max_tokens: 1000,
                output: OutputFormat::Json,
            },
            Task::RewriteContent => TaskProfile {
                system: prompts::REWRITE_CONTENT_SYSTEM,
                temperature: 0.7,
                max_tokens: 3000,
                output: OutputFormat::Json,
            },
            Task::AnalyzeColors => TaskProfile {
                system: prompts::ANALYZE_COLORS_SYSTEM,
                temperature: 0.3,
                max_tokens: 800,
                output: OutputFormat::Json,
            },
            Task::PinterestTitle => TaskProfile {
                system: prompts::PINTEREST_TITLE_SYSTEM,
                temperature: 0.9,
                max_tokens: 50,
                output: OutputFormat::PlainTitle,
            },
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::UnknownTask(s.to_string()))
    }
}
