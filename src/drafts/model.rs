//! Reply draft model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata key holding suggested follow-up actions.
pub const FOLLOW_UPS_KEY: &str = "suggested_follow_ups";

/// A locally stored email draft. Drafts are never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyDraft {
    /// Unique ID. Saving a draft with an existing ID replaces the old one.
    pub id: String,
    /// Message this draft replies to, if any.
    #[serde(default)]
    pub email_id: Option<String>,
    pub subject: String,
    pub body: String,
    /// Free-form metadata (e.g. suggested follow-ups).
    #[serde(default = "empty_object")]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

impl ReplyDraft {
    /// Create a draft with a fresh ID and empty metadata.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_draft_id(now),
            email_id: None,
            subject: subject.into(),
            body: body.into(),
            metadata: empty_object(),
            created_at: now,
        }
    }

    /// Builder: set the source message.
    pub fn in_reply_to(mut self, email_id: impl Into<String>) -> Self {
        self.email_id = Some(email_id.into());
        self
    }

    /// Builder: set a metadata field.
    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        if !self.metadata.is_object() {
            self.metadata = empty_object();
        }
        self.metadata[key] = value;
        self
    }

    /// Suggested follow-ups recorded in metadata.
    pub fn follow_ups(&self) -> Vec<&str> {
        self.metadata
            .get(FOLLOW_UPS_KEY)
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

/// `draft_<YYYYmmdd_HHMMSS>_<8 hex>`.
fn new_draft_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("draft_{}_{}", now.format("%Y%m%d_%H%M%S"), &suffix[..8])
}
