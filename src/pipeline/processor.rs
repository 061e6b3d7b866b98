//! Email processor: categorizes messages and extracts their action items.
//!
//! Flow per message:
//! 1. Categorization prompt → engine → `CategoryDecision` (fallback: Important)
//! 2. Action prompt → engine → `Vec<ActionItem>` (fallback: empty)
//!
//! A message that falls back never stops the rest of the batch.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::engine::{DecisionContext, EngineHandle};
use crate::inbox::model::{ActionItem, Message};
use crate::pipeline::parse::{parse_actions, parse_category};
use crate::pipeline::types::{CategoryDecision, ProcessSummary};
use crate::prompts::PromptTemplates;

/// Runs categorization and action extraction over the inbox.
pub struct EmailProcessor {
    engine: EngineHandle,
    /// Fixed reference date for deadlines; `None` means today.
    reference_date: Option<NaiveDate>,
}

impl EmailProcessor {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            reference_date: None,
        }
    }

    /// Builder: compute deadlines from a fixed date instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Categorize every message and fill in its action items.
    pub fn process_emails(
        &self,
        messages: &mut [Message],
        prompts: &PromptTemplates,
    ) -> ProcessSummary {
        info!(count = messages.len(), "Processing inbox");
        let mut summary = ProcessSummary::default();

        for message in messages.iter_mut() {
            let decision = self
                .try_categorize(message, &prompts.categorization_prompt)
                .unwrap_or_else(|| {
                    summary.category_fallbacks += 1;
                    CategoryDecision::fallback()
                });
            let actions = self
                .try_extract_actions(message, &prompts.action_item_prompt)
                .unwrap_or_else(|| {
                    summary.action_fallbacks += 1;
                    Vec::new()
                });

            debug!(
                id = %message.id,
                category = %decision.category,
                reason = %decision.reason,
                actions = actions.len(),
                "Message processed"
            );
            message.category = Some(decision.category);
            message.actions = actions;
            summary.processed += 1;
        }

        info!(
            processed = summary.processed,
            category_fallbacks = summary.category_fallbacks,
            action_fallbacks = summary.action_fallbacks,
            "Inbox processing complete"
        );
        summary
    }

    /// Categorize one message, falling back to `Important`.
    pub fn categorize_email(&self, message: &Message, prompt: &str) -> CategoryDecision {
        self.try_categorize(message, prompt).unwrap_or_else(CategoryDecision::fallback)
    }

    /// Extract action items from one message, falling back to none.
    pub fn extract_actions(&self, message: &Message, prompt: &str) -> Vec<ActionItem> {
        self.try_extract_actions(message, prompt).unwrap_or_default()
    }

    fn try_categorize(&self, message: &Message, prompt: &str) -> Option<CategoryDecision> {
        let context = DecisionContext::new()
            .with_message(&message.subject, &message.body)
            .with_sender(&message.sender);
        let raw = self.engine.run(prompt, &context);
        parse_category(&raw)
            .map_err(|e| {
                warn!(
                    id = %message.id,
                    error = %e,
                    "Categorization output unusable, defaulting to Important"
                );
            })
            .ok()
    }

    fn try_extract_actions(&self, message: &Message, prompt: &str) -> Option<Vec<ActionItem>> {
        let context = DecisionContext::new()
            .with_message(&message.subject, &message.body)
            .with_reference_date(self.reference_date());
        let raw = self.engine.run(prompt, &context);
        parse_actions(&raw)
            .map_err(|e| {
                warn!(id = %message.id, error = %e, "Action output unusable, defaulting to none");
            })
            .ok()
    }
}
