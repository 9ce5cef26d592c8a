//! Lenient JSON recovery for model output that should be a JSON object but may
//! arrive wrapped in markdown fences or surrounded by prose.
//!
//! Two tiers, nothing deeper:
//! 1. strip every code fence marker, trim, parse strictly
//! 2. parse the slice from the first `{` to the last `}` of the original text
//!
//! Unbalanced brackets, trailing commas and the like are failures, never patched.

use serde_json::{Map, Value};
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("model returned empty content")]
    EmptyOutput,

    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("model output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Recovers a JSON object from raw model output.
pub fn recover_json(text: &str) -> Result<Map<String, Value>, RecoveryError> {
    let cleaned = strip_code_fences(text);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(cleaned.trim()) {
        return Ok(map);
    }

    let start = text.find('{').ok_or(RecoveryError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(RecoveryError::NoJsonObject)?;
    if end < start {
        return Err(RecoveryError::NoJsonObject);
    }

    match serde_json::from_str::<Value>(&text[start..=end])? {
        Value::Object(map) => Ok(map),
        _ => Err(RecoveryError::NoJsonObject),
    }
}

/// Removes every ``` marker, along with a language tag and one line break
/// directly following it.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + FENCE.len()..];

        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        if after_tag.is_empty()
            || after_tag.starts_with(char::is_whitespace)
            || after_tag.starts_with('{')
        {
            rest = after_tag;
        }

        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
    }

    out.push_str(rest);
    out
}
