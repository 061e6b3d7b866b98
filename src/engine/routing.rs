//! Intent routing for the rule engine.

use super::DecisionContext;

/// Which decision-table mode answers a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Categorize,
    ExtractActions,
    DraftReply,
    Summarize,
    AnswerQuery,
    Acknowledge,
}

impl EngineMode {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Categorize => "categorize",
            Self::ExtractActions => "extract_actions",
            Self::DraftReply => "draft_reply",
            Self::Summarize => "summarize",
            Self::AnswerQuery => "answer_query",
            Self::Acknowledge => "acknowledge",
        }
    }

    /// Pick a mode. Checks run in a fixed order and the first hit wins.
    pub fn route(intent: &str, context: &DecisionContext) -> Self {
        let intent = intent.to_lowercase();
        if intent.contains("categorize") {
            Self::Categorize
        } else if intent.contains("extract") && intent.contains("task") {
            Self::ExtractActions
        } else if intent.contains("draft") && intent.contains("reply") {
            Self::DraftReply
        } else if intent.contains("summarize") {
            Self::Summarize
        } else if context.query.is_some() {
            Self::AnswerQuery
        } else {
            Self::Acknowledge
        }
    }
}
