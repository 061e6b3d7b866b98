//! Shared types for the processing pipeline.

use serde::{Deserialize, Serialize};

use crate::inbox::model::Category;

/// Reason recorded when a category could not be parsed from engine output.
pub const FALLBACK_CATEGORY_REASON: &str = "Could not parse categorization; defaulted to Important";

/// Category decision for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDecision {
    pub category: Category,
    #[serde(default)]
    pub reason: String,
}

impl CategoryDecision {
    /// Safe default used when the engine output is unusable.
    pub fn fallback() -> Self {
        Self {
            category: Category::Important,
            reason: FALLBACK_CATEGORY_REASON.to_string(),
        }
    }
}

/// Draft fields recovered from engine output. Missing fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DraftPayload {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub suggested_follow_ups: Vec<String>,
}

/// Outcome of a processing pass over the inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    /// Messages whose category fell back to the default.
    pub category_fallbacks: usize,
    /// Messages whose action list fell back to empty.
    pub action_fallbacks: usize,
}
