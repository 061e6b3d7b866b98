//! Prompt templates.
//!
//! The three stored prompts double as routing keys for the decision engine:
//! their wording decides which engine mode answers a call.

use serde::{Deserialize, Serialize};

/// Built-in categorization prompt.
pub const DEFAULT_CATEGORIZATION_PROMPT: &str = "Categorize emails into: Important, Newsletter, Spam, To-Do. \
To-Do emails must include a direct request requiring user action. \
Respond with JSON: { \"category\": \"Important|Newsletter|Spam|To-Do\", \"reason\": \"...\" }.";

/// Built-in action-extraction prompt.
pub const DEFAULT_ACTION_ITEM_PROMPT: &str = "Extract tasks from the email. \
Respond in JSON array: [ { \"task\": \"...\", \"deadline\": \"...\" }, ... ]. \
If no clear deadline, set deadline to null.";

/// Built-in reply-generation prompt.
pub const DEFAULT_AUTO_REPLY_PROMPT: &str = "If an email is a meeting request, draft a polite reply asking for an agenda. \
Otherwise, write a brief, polite reply that acknowledges the email and suggests next steps. \
Reply in JSON: { \"subject\": \"...\", \"body\": \"...\", \"suggested_follow_ups\": [\"...\"] }.";

/// Intent used for chat queries that are not about drafting or summarizing.
pub const ASSISTANT_INTENT: &str = "You are an email assistant. Answer based on context.";

/// Intent used for chat queries asking for a summary.
pub const SUMMARY_INTENT: &str = "Summarize the selected email in a few bullet points.";

/// Intent used when composing a new email from an instruction.
pub const COMPOSE_INTENT: &str = "Generate email";

/// One of the three editable prompt slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSlot {
    Categorization,
    ActionItems,
    AutoReply,
}

impl std::str::FromStr for PromptSlot {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "categorization" | "categorize" | "category" => Ok(Self::Categorization),
            "actions" | "action" | "action_items" | "extraction" => Ok(Self::ActionItems),
            "reply" | "auto_reply" | "draft" => Ok(Self::AutoReply),
            _ => Err(format!("Unknown prompt slot: {}", s)),
        }
    }
}

impl std::fmt::Display for PromptSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Categorization => write!(f, "categorization"),
            Self::ActionItems => write!(f, "actions"),
            Self::AutoReply => write!(f, "reply"),
        }
    }
}

/// The stored prompt set. Exactly three slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptTemplates {
    pub categorization_prompt: String,
    pub action_item_prompt: String,
    pub auto_reply_prompt: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            categorization_prompt: DEFAULT_CATEGORIZATION_PROMPT.to_string(),
            action_item_prompt: DEFAULT_ACTION_ITEM_PROMPT.to_string(),
            auto_reply_prompt: DEFAULT_AUTO_REPLY_PROMPT.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn get(&self, slot: PromptSlot) -> &str {
        match slot {
            PromptSlot::Categorization => &self.categorization_prompt,
            PromptSlot::ActionItems => &self.action_item_prompt,
            PromptSlot::AutoReply => &self.auto_reply_prompt,
        }
    }

    /// Replace one slot, leaving the others untouched.
    pub fn set(&mut self, slot: PromptSlot, text: impl Into<String>) {
        let text = text.into();
        match slot {
            PromptSlot::Categorization => self.categorization_prompt = text,
            PromptSlot::ActionItems => self.action_item_prompt = text,
            PromptSlot::AutoReply => self.auto_reply_prompt = text,
        }
    }
}
