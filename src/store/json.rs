//! JSON file store.
//!
//! The data directory holds three documents, each read and rewritten whole:
//! - `default_prompts.json`: the prompt set
//! - `drafts.json`: array of drafts
//! - `mock_inbox.json`: array of messages (read-only)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::drafts::ReplyDraft;
use crate::error::StoreError;
use crate::inbox::model::Message;
use crate::prompts::PromptTemplates;
use crate::store::traits::Store;

/// Well-known document file names.
pub mod paths {
    pub const PROMPTS: &str = "default_prompts.json";
    pub const DRAFTS: &str = "drafts.json";
    pub const INBOX: &str = "mock_inbox.json";
}

/// Store backed by JSON files in one directory.
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `base_path` without touching the disk.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Create a store and make sure its directory exists.
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(base_path);
        fs::create_dir_all(&store.base_path)
            .await
            .map_err(|source| StoreError::Io {
                path: store.base_path.clone(),
                source,
            })?;
        Ok(store)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute path of a document.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    async fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.resolve_path(name);
        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
            path,
            reason: e.to_string(),
        })
    }

    async fn write_document<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.resolve_path(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }

    /// Drafts to merge into. A missing or malformed collection starts over
    /// empty; a read failure is reported so nothing gets clobbered.
    async fn drafts_for_update(&self) -> Result<Vec<ReplyDraft>, StoreError> {
        match self.try_load_drafts().await {
            Ok(drafts) => Ok(drafts),
            Err(StoreError::NotFound { .. }) => Ok(Vec::new()),
            Err(e @ StoreError::Malformed { .. }) => {
                warn!(error = %e, "Draft collection malformed, starting a new one");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn try_load_prompts(&self) -> Result<PromptTemplates, StoreError> {
        self.read_document(paths::PROMPTS).await
    }

    async fn save_prompts(&self, prompts: &PromptTemplates) -> Result<(), StoreError> {
        self.write_document(paths::PROMPTS, prompts).await?;
        info!("Prompts saved");
        Ok(())
    }

    async fn try_load_drafts(&self) -> Result<Vec<ReplyDraft>, StoreError> {
        self.read_document(paths::DRAFTS).await
    }

    async fn save_draft(&self, draft: &ReplyDraft) -> Result<(), StoreError> {
        let mut drafts = self.drafts_for_update().await?;
        let before = drafts.len();
        drafts.retain(|d| d.id != draft.id);
        let replaced = drafts.len() != before;
        drafts.push(draft.clone());
        self.write_document(paths::DRAFTS, &drafts).await?;
        info!(id = %draft.id, replaced, total = drafts.len(), "Draft saved");
        Ok(())
    }

    async fn delete_draft(&self, id: &str) -> Result<(), StoreError> {
        let (mut drafts, reset) = match self.try_load_drafts().await {
            Ok(drafts) => (drafts, false),
            Err(StoreError::NotFound { .. }) => {
                debug!(id, "No draft collection, nothing to delete");
                return Ok(());
            }
            Err(e @ StoreError::Malformed { .. }) => {
                warn!(error = %e, "Draft collection malformed, resetting it");
                (Vec::new(), true)
            }
            Err(e) => return Err(e),
        };
        let before = drafts.len();
        drafts.retain(|d| d.id != id);
        if drafts.len() == before && !reset {
            debug!(id, "Draft not found, nothing to delete");
            return Ok(());
        }
        self.write_document(paths::DRAFTS, &drafts).await?;
        info!(id, remaining = drafts.len(), "Draft deleted");
        Ok(())
    }

    async fn try_load_inbox(&self) -> Result<Vec<Message>, StoreError> {
        self.read_document(paths::INBOX).await
    }
}
