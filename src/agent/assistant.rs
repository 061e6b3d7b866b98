//! Email agent: chat answers and draft generation on top of the engine.

use tracing::{debug, info, warn};

use crate::drafts::{FOLLOW_UPS_KEY, ReplyDraft};
use crate::engine::{DecisionContext, EngineHandle};
use crate::inbox::model::Message;
use crate::pipeline::parse::{failure_reason, parse_draft};
use crate::prompts::{ASSISTANT_INTENT, COMPOSE_INTENT, PromptTemplates, SUMMARY_INTENT};

/// Body used when a reply draft cannot be generated.
pub const FALLBACK_REPLY_BODY: &str = "Thank you for your email. I will respond shortly.";

/// Subject used for a new email when none is given.
pub const DEFAULT_NEW_SUBJECT: &str = "New Email";

/// Answers chat queries and writes drafts.
pub struct EmailAgent {
    engine: EngineHandle,
}

impl EmailAgent {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Answer a chat query, optionally about one selected message.
    pub fn run_query(
        &self,
        query: &str,
        selected: Option<&Message>,
        prompts: &PromptTemplates,
    ) -> String {
        let mut context = DecisionContext::new().with_query(query);
        if let Some(message) = selected {
            context = context.with_message(&message.subject, &message.body);
            if let Some(category) = message.category {
                context = context.with_category(category.as_str());
            }
        }

        let intent = select_intent(query, prompts);
        debug!(
            selected = selected.map(|m| m.id.as_str()).unwrap_or("none"),
            "Running chat query"
        );
        let raw = self.engine.run(intent, &context);
        render_answer(&raw)
    }

    /// Generate a reply to `message` in the given tone.
    ///
    /// Unusable engine output yields a short acknowledgement instead.
    pub fn generate_reply_draft(
        &self,
        message: &Message,
        prompts: &PromptTemplates,
        tone: &str,
    ) -> ReplyDraft {
        let context = DecisionContext::new()
            .with_message(&message.subject, &message.body)
            .with_sender(&message.sender)
            .with_tone(tone);
        let raw = self.engine.run(&prompts.auto_reply_prompt, &context);
        let fallback_subject = format!("Re: {}", message.subject);

        let draft = match parse_draft(&raw) {
            Ok(payload) => ReplyDraft::new(
                payload.subject.unwrap_or(fallback_subject),
                payload
                    .body
                    .filter(|b| !b.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_REPLY_BODY.to_string()),
            )
            .with_metadata(FOLLOW_UPS_KEY, serde_json::json!(payload.suggested_follow_ups)),
            Err(e) => {
                warn!(id = %message.id, error = %e, "Reply output unusable, using acknowledgement");
                ReplyDraft::new(fallback_subject, FALLBACK_REPLY_BODY)
            }
        }
        .in_reply_to(&message.id);

        info!(id = %draft.id, email_id = %message.id, tone, "Reply draft generated");
        draft
    }

    /// Compose a new email from an instruction.
    ///
    /// Subject falls back to `subject`, then "New Email"; the body falls
    /// back to the instruction itself.
    pub fn generate_new_draft(&self, instruction: &str, to: &str, subject: &str) -> ReplyDraft {
        let context = DecisionContext::new()
            .with_instruction(instruction)
            .with_recipient(to)
            .with_message(subject, "");
        let raw = self.engine.run(COMPOSE_INTENT, &context);

        let fallback_subject = if subject.trim().is_empty() {
            DEFAULT_NEW_SUBJECT.to_string()
        } else {
            subject.trim().to_string()
        };

        let payload = parse_draft(&raw).unwrap_or_else(|e| {
            debug!(error = %e, "Compose output unusable, using instruction");
            Default::default()
        });
        let body = payload
            .body
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| instruction.to_string());

        let mut draft = ReplyDraft::new(payload.subject.unwrap_or(fallback_subject), body);
        if !to.trim().is_empty() {
            draft = draft.with_metadata("to", serde_json::json!(to.trim()));
        }
        info!(id = %draft.id, "New draft generated");
        draft
    }
}

/// Pick the intent for a chat query.
fn select_intent<'a>(query: &str, prompts: &'a PromptTemplates) -> &'a str {
    let query = query.to_lowercase();
    if query.contains("draft") || query.contains("reply") {
        &prompts.auto_reply_prompt
    } else if query.contains("summar") {
        SUMMARY_INTENT
    } else {
        ASSISTANT_INTENT
    }
}

/// Make engine output readable in the chat pane.
fn render_answer(raw: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) else {
        return raw.to_string();
    };
    if let Some(reason) = failure_reason(&value) {
        return format!("Error: {reason}");
    }
    match parse_draft(raw) {
        Ok(payload) if payload.body.is_some() => {
            let mut out = String::new();
            if let Some(subject) = payload.subject {
                out.push_str(&format!("Subject: {subject}\n\n"));
            }
            out.push_str(payload.body.as_deref().unwrap_or_default());
            if !payload.suggested_follow_ups.is_empty() {
                out.push_str("\n\nSuggested follow-ups:\n");
                for f in &payload.suggested_follow_ups {
                    out.push_str(&format!("• {f}\n"));
                }
            }
            out.trim_end().to_string()
        }
        _ => value
            .get("response")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| raw.to_string()),
    }
}
