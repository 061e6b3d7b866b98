//! Decision engine, the stand-in for a text-generation backend.
//!
//! Callers hand an intent (one of the stored prompts) and a context bag to
//! `decide()` and get text back, the same contract a real model would have.
//! The shipped backend is a keyword decision table (`RuleEngine`).
//!
//! `EngineHandle` is the boundary every caller goes through: it turns engine
//! errors into a `{"error": ..., "status": "failed"}` payload so nothing below
//! it ever surfaces as a failure.

pub mod replies;
pub mod routing;
pub mod rules;

pub use routing::EngineMode;
pub use rules::RuleEngine;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{AppConfig, EngineBackend};
use crate::error::EngineError;

/// Context handed to the engine alongside the intent.
///
/// Each call site fills only the fields it has.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionContext {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub sender: Option<String>,
    pub category: Option<String>,
    pub tone: Option<String>,
    /// Free-text chat query. Its presence enables query-answer mode.
    pub query: Option<String>,
    /// Instruction for composing a new email.
    pub instruction: Option<String>,
    /// Recipient for a new email.
    pub to: Option<String>,
    /// Date deadlines are computed from.
    pub reference_date: Option<NaiveDate>,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: subject and body of the message under consideration.
    pub fn with_message(mut self, subject: impl Into<String>, body: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self.body = Some(body.into());
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Lower-cased body, empty when absent.
    pub fn body_lower(&self) -> String {
        self.body.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Lower-cased subject, empty when absent.
    pub fn subject_lower(&self) -> String {
        self.subject.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// A backend that answers `decide(intent, context)` with text.
///
/// Output is whatever the backend produces, usually JSON for structured
/// modes, prose otherwise. Callers parse it and fall back on failure.
pub trait DecisionEngine: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Produce a response for `intent` given `context`.
    fn decide(&self, intent: &str, context: &DecisionContext) -> Result<String, EngineError>;
}

/// Engine boundary: converts backend errors into a failure payload.
#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<dyn DecisionEngine>,
    debug: bool,
}

impl EngineHandle {
    pub fn new(engine: Arc<dyn DecisionEngine>, debug: bool) -> Self {
        Self { engine, debug }
    }

    /// Name of the wrapped backend.
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Run the engine. Never fails; errors come back as a failure payload.
    pub fn run(&self, intent: &str, context: &DecisionContext) -> String {
        match self.engine.decide(intent, context) {
            Ok(output) => {
                debug!(engine = self.engine.name(), len = output.len(), "Engine responded");
                output
            }
            Err(e) => {
                if self.debug {
                    warn!(engine = self.engine.name(), error = %e, "Engine call failed");
                }
                failure_payload(&e.to_string())
            }
        }
    }
}

/// `{"error": <message>, "status": "failed"}`.
pub fn failure_payload(message: &str) -> String {
    serde_json::json!({ "error": message, "status": "failed" }).to_string()
}

/// Create the configured engine, wrapped in its boundary.
pub fn create_engine(config: &AppConfig) -> EngineHandle {
    let engine: Arc<dyn DecisionEngine> = match config.engine {
        EngineBackend::Rules => Arc::new(RuleEngine::new(config.deadlines)),
    };
    tracing::info!(engine = engine.name(), "Using decision engine");
    EngineHandle::new(engine, config.debug)
}
