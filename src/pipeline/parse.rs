//! Parsing engine output into the shapes callers expect.
//!
//! A text-generation backend may wrap JSON in markdown or prose, or return
//! the boundary's failure payload. Every parser here reports those cases as
//! a `ParseError`; callers decide the fallback.

use serde_json::Value;

use crate::error::ParseError;
use crate::inbox::model::ActionItem;
use crate::pipeline::types::{CategoryDecision, DraftPayload};

/// Parse a `{"category": ..., "reason": ...}` decision.
pub fn parse_category(raw: &str) -> Result<CategoryDecision, ParseError> {
    let value = parse_value(raw, '{', '}')?;
    if !value.is_object() {
        return Err(ParseError::Shape("expected a JSON object".into()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a JSON array of `{"task": ..., "deadline": ...}` items.
///
/// Items that are not usable tasks are skipped rather than failing the list.
pub fn parse_actions(raw: &str) -> Result<Vec<ActionItem>, ParseError> {
    let value = parse_value(raw, '[', ']')?;
    let items = value
        .as_array()
        .ok_or_else(|| ParseError::Shape("expected a JSON array".into()))?;
    Ok(items.iter().filter_map(ActionItem::from_value).collect())
}

/// Parse a `{"subject", "body", "suggested_follow_ups"}` draft.
pub fn parse_draft(raw: &str) -> Result<DraftPayload, ParseError> {
    let value = parse_value(raw, '{', '}')?;
    if !value.is_object() {
        return Err(ParseError::Shape("expected a JSON object".into()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Extract and decode JSON, rejecting the engine's failure payload.
fn parse_value(raw: &str, open: char, close: char) -> Result<Value, ParseError> {
    let json_str = extract_json(raw, open, close);
    let value: Value = serde_json::from_str(&json_str)?;
    if let Some(reason) = failure_reason(&value) {
        return Err(ParseError::EngineFailed(reason));
    }
    Ok(value)
}

/// `Some(reason)` if `value` is a `{"status": "failed"}` payload.
pub fn failure_reason(value: &Value) -> Option<String> {
    if value.get("status").and_then(Value::as_str) != Some("failed") {
        return None;
    }
    Some(
        value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

/// Extract a JSON value delimited by `open`/`close` from engine output
/// (handles markdown wrapping). A failure payload object is always
/// returned as-is so it can be recognised.
fn extract_json(text: &str, open: char, close: char) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with(open) || trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    // Wrapped in markdown code block
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with(open) {
                return inner.to_string();
            }
        }
    }

    // Try to find value bounds
    if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close))
        && end > start
    {
        return trimmed[start..=end].to_string();
    }

    trimmed.to_string()
}
