//! `Store` trait: single async interface for document persistence.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::drafts::ReplyDraft;
use crate::error::StoreError;
use crate::inbox::model::Message;
use crate::prompts::PromptTemplates;

/// Whole-document storage for prompts, drafts, and the inbox snapshot.
///
/// The `try_*` loaders report why a document could not be read. The plain
/// loaders never fail: they log and fall back to defaults.
#[async_trait]
pub trait Store: Send + Sync {
    // ── Prompts ─────────────────────────────────────────────────────

    /// Load the stored prompt set.
    async fn try_load_prompts(&self) -> Result<PromptTemplates, StoreError>;

    /// Overwrite the stored prompt set.
    async fn save_prompts(&self, prompts: &PromptTemplates) -> Result<(), StoreError>;

    /// Built-in prompt set, used when nothing is stored.
    fn default_prompts(&self) -> PromptTemplates {
        PromptTemplates::default()
    }

    /// Stored prompts, or the built-in defaults.
    async fn load_prompts(&self) -> PromptTemplates {
        match self.try_load_prompts().await {
            Ok(prompts) => prompts,
            Err(e) => {
                log_fallback("prompts", &e);
                self.default_prompts()
            }
        }
    }

    // ── Drafts ──────────────────────────────────────────────────────

    /// Load all drafts, oldest first.
    async fn try_load_drafts(&self) -> Result<Vec<ReplyDraft>, StoreError>;

    /// Insert a draft, replacing any draft with the same ID.
    async fn save_draft(&self, draft: &ReplyDraft) -> Result<(), StoreError>;

    /// Remove a draft by ID. Removing an unknown ID succeeds.
    async fn delete_draft(&self, id: &str) -> Result<(), StoreError>;

    /// Stored drafts, or none.
    async fn load_drafts(&self) -> Vec<ReplyDraft> {
        match self.try_load_drafts().await {
            Ok(drafts) => drafts,
            Err(e) => {
                log_fallback("drafts", &e);
                Vec::new()
            }
        }
    }

    // ── Inbox ───────────────────────────────────────────────────────

    /// Load the inbox snapshot.
    async fn try_load_inbox(&self) -> Result<Vec<Message>, StoreError>;

    /// Inbox snapshot, or an empty inbox.
    async fn load_inbox(&self) -> Vec<Message> {
        match self.try_load_inbox().await {
            Ok(messages) => messages,
            Err(e) => {
                log_fallback("inbox", &e);
                Vec::new()
            }
        }
    }
}

fn log_fallback(document: &str, error: &StoreError) {
    match error {
        StoreError::NotFound { .. } => {
            debug!(document, "Document missing, using default");
        }
        _ => {
            warn!(
                document,
                kind = error.label(),
                error = %error,
                "Document unreadable, using default"
            );
        }
    }
}
