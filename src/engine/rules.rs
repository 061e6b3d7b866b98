//! Keyword decision table.
//!
//! Every mode is a fixed list of rules checked against the lower-cased
//! message text. Categorization stops at the first match; extraction
//! collects every match in rule order.

use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::replies::{self, DraftKind};
use super::routing::EngineMode;
use super::{DecisionContext, DecisionEngine};
use crate::config::DeadlinePolicy;
use crate::error::EngineError;
use crate::inbox::model::{ActionItem, Category};

pub const FINANCIAL_TERMS: &[&str] = &["$", "budget", "payment", "cost", "funding"];
pub const FINANCIAL_URGENCY_TERMS: &[&str] = &["urgent", "asap", "immediately", "confirm"];
pub const SCHEDULING_TERMS: &[&str] = &["meeting", "schedule", "calendar", "appointment", "call"];
pub const URGENCY_TERMS: &[&str] = &["urgent", "asap", "critical", "immediate", "deadline"];
pub const NEWSLETTER_TERMS: &[&str] = &["unsubscribe", "newsletter", "weekly", "digest"];
pub const SPAM_TERMS: &[&str] = &[
    "click here",
    "win",
    "prize",
    "lottery",
    "congratulations",
    "verify account",
    "limited offer",
    "act now",
    "claim",
];

/// Case-insensitive substring match against any of a fixed set of terms.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    terms: Vec<String>,
    regex: Regex,
}

impl KeywordSet {
    pub fn new(terms: &[&str]) -> Self {
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        // Escaped literals joined by `|` always compile.
        let regex = Regex::new(&format!("(?i)(?:{alternation})")).unwrap();
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            regex,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.terms.is_empty() && self.regex.is_match(text)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Which message text a categorization rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Body,
    BodyOrSubject,
}

/// Assigns `category` when every keyword set matches the field.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: &'static str,
    pub requires: Vec<KeywordSet>,
    pub field: RuleField,
    pub category: Category,
    pub reason: &'static str,
}

impl CategoryRule {
    fn matches(&self, subject: &str, body: &str) -> bool {
        match self.field {
            RuleField::Body => self.requires.iter().all(|set| set.is_match(body)),
            RuleField::BodyOrSubject => self
                .requires
                .iter()
                .all(|set| set.is_match(body) || set.is_match(subject)),
        }
    }
}

/// Emits an action item when the body matches.
#[derive(Debug, Clone)]
pub struct ActionRule {
    pub keywords: KeywordSet,
    pub task: &'static str,
    pub due_in_days: u32,
}

/// Category decision as emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutput {
    pub category: Category,
    pub reason: String,
}

/// Reason used when no categorization rule matches.
pub const DEFAULT_REASON: &str = "Requires attention";

/// Deterministic keyword-matching decision engine.
pub struct RuleEngine {
    category_rules: Vec<CategoryRule>,
    action_rules: Vec<ActionRule>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(DeadlinePolicy::default())
    }
}

impl RuleEngine {
    /// Build the standard decision table.
    pub fn new(deadlines: DeadlinePolicy) -> Self {
        let category_rules = vec![
            CategoryRule {
                name: "financial_urgent",
                requires: vec![
                    KeywordSet::new(FINANCIAL_TERMS),
                    KeywordSet::new(FINANCIAL_URGENCY_TERMS),
                ],
                field: RuleField::Body,
                category: Category::ToDo,
                reason: "Financial matter requiring immediate action",
            },
            CategoryRule {
                name: "scheduling",
                requires: vec![KeywordSet::new(SCHEDULING_TERMS)],
                field: RuleField::Body,
                category: Category::ToDo,
                reason: "Meeting request requiring response",
            },
            CategoryRule {
                name: "urgent",
                requires: vec![KeywordSet::new(URGENCY_TERMS)],
                field: RuleField::Body,
                category: Category::Important,
                reason: "Marked as urgent or time-sensitive",
            },
            CategoryRule {
                name: "newsletter",
                requires: vec![KeywordSet::new(NEWSLETTER_TERMS)],
                field: RuleField::Body,
                category: Category::Newsletter,
                reason: "Newsletter or promotional content",
            },
            CategoryRule {
                name: "spam",
                requires: vec![KeywordSet::new(SPAM_TERMS)],
                field: RuleField::BodyOrSubject,
                category: Category::Spam,
                reason: "Contains spam indicators and urgency tactics",
            },
        ];

        let action_rules = vec![
            ActionRule {
                keywords: KeywordSet::new(&["meeting", "schedule"]),
                task: "Confirm meeting attendance and schedule",
                due_in_days: deadlines.meeting_days,
            },
            ActionRule {
                keywords: KeywordSet::new(&["review", "feedback"]),
                task: "Review and provide feedback",
                due_in_days: deadlines.review_days,
            },
            ActionRule {
                keywords: KeywordSet::new(&["submit", "send", "share", "upload"]),
                task: "Complete and submit required items",
                due_in_days: deadlines.submit_days,
            },
            ActionRule {
                keywords: KeywordSet::new(&["rsvp"]),
                task: "RSVP for event",
                due_in_days: deadlines.rsvp_days,
            },
        ];

        Self {
            category_rules,
            action_rules,
        }
    }

    /// First matching categorization rule, or `Important` with the default reason.
    pub fn categorize(&self, subject: &str, body: &str) -> CategoryOutput {
        for rule in &self.category_rules {
            if rule.matches(subject, body) {
                debug!(rule = rule.name, category = %rule.category, "Categorization rule matched");
                return CategoryOutput {
                    category: rule.category,
                    reason: rule.reason.to_string(),
                };
            }
        }
        CategoryOutput {
            category: Category::Important,
            reason: DEFAULT_REASON.to_string(),
        }
    }

    /// All matching action items, in rule order.
    ///
    /// Deadlines are `reference + due_in_days`; without a reference date
    /// they are left unset.
    pub fn extract_actions(&self, body: &str, reference: Option<NaiveDate>) -> Vec<ActionItem> {
        self.action_rules
            .iter()
            .filter(|rule| rule.keywords.is_match(body))
            .map(|rule| {
                let deadline = reference
                    .and_then(|d| d.checked_add_days(Days::new(u64::from(rule.due_in_days))));
                ActionItem::new(rule.task, deadline)
            })
            .collect()
    }

    /// Bullet summary of what the body touches on.
    pub fn summarize(&self, body: &str) -> String {
        let body = body.to_lowercase();
        let mut parts = Vec::new();
        if body.contains('$') || body.contains("budget") {
            parts.push("• Contains financial/budget information");
        }
        if body.contains("meeting") {
            parts.push("• Meeting or schedule request");
        }
        if body.contains("deadline") || body.contains("urgent") {
            parts.push("• Time-sensitive matter");
        }
        let summary = if parts.is_empty() {
            "• General communication".to_string()
        } else {
            parts.join("\n")
        };
        format!(
            "**Email Summary:**\n\n{summary}\n\n**Action Required:** Review and respond appropriately."
        )
    }
}

impl DecisionEngine for RuleEngine {
    fn name(&self) -> &str {
        "rules"
    }

    fn decide(&self, intent: &str, context: &DecisionContext) -> Result<String, EngineError> {
        let mode = EngineMode::route(intent, context);
        debug!(mode = mode.label(), "Routing engine call");

        let subject = context.subject.as_deref().unwrap_or_default();
        let body = context.body.as_deref().unwrap_or_default();

        let output = match mode {
            EngineMode::Categorize => serde_json::to_string(&self.categorize(subject, body))?,
            EngineMode::ExtractActions => {
                serde_json::to_string(&self.extract_actions(body, context.reference_date))?
            }
            EngineMode::DraftReply => {
                let kind = DraftKind::for_body(&context.body_lower());
                let draft =
                    replies::build_draft(kind, context.subject.as_deref(), context.tone.as_deref());
                serde_json::to_string(&draft)?
            }
            EngineMode::Summarize => self.summarize(body),
            EngineMode::AnswerQuery => {
                replies::answer_query(context.query.as_deref().unwrap_or_default())
            }
            EngineMode::Acknowledge => {
                serde_json::json!({ "response": "Processing complete" }).to_string()
            }
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{
        DEFAULT_ACTION_ITEM_PROMPT, DEFAULT_AUTO_REPLY_PROMPT, DEFAULT_CATEGORIZATION_PROMPT,
        SUMMARY_INTENT,
    };

    fn engine() -> RuleEngine {
        RuleEngine::default()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── Categorization ──────────────────────────────────────────────

    #[test]
    fn financial_and_urgent_is_todo() {
        let out = engine().categorize(
            "Budget approval",
            "Please review the attached budget request, $50,000, urgent approval needed",
        );
        assert_eq!(out.category, Category::ToDo);
        assert!(out.reason.contains("Financial matter"));
    }

    #[test]
    fn financial_without_urgency_falls_through() {
        let out = engine().categorize("Invoice", "The payment went through fine.");
        assert_eq!(out.category, Category::Important);
        assert_eq!(out.reason, DEFAULT_REASON);
    }

    #[test]
    fn scheduling_term_alone_is_todo() {
        for body in [
            "Can we set up a meeting?",
            "Please check your calendar",
            "Dentist appointment reminder",
            "Let's schedule something",
            "Give me a call",
        ] {
            let out = engine().categorize("", body);
            assert_eq!(out.category, Category::ToDo, "body: {body}");
            assert_eq!(out.reason, "Meeting request requiring response");
        }
    }

    #[test]
    fn urgency_is_important() {
        let out = engine().categorize("", "This is CRITICAL, the deadline is Friday");
        assert_eq!(out.category, Category::Important);
        assert!(out.reason.contains("urgent"));
    }

    #[test]
    fn newsletter_terms() {
        let out = engine().categorize("", "Your weekly digest is here. Unsubscribe anytime.");
        assert_eq!(out.category, Category::Newsletter);
    }

    #[test]
    fn spam_in_body_or_subject() {
        let out = engine().categorize("", "You are a lottery winner!");
        assert_eq!(out.category, Category::Spam);

        let out = engine().categorize("Claim your reward", "Nothing to see here.");
        assert_eq!(out.category, Category::Spam);
    }

    #[test]
    fn spam_without_earlier_signals() {
        for term in SPAM_TERMS {
            let body = format!("Hello friend, {term} today.");
            let out = engine().categorize("Hello", &body);
            assert_eq!(out.category, Category::Spam, "term: {term}");
        }
    }

    #[test]
    fn scheduling_beats_urgency_and_spam() {
        let out = engine().categorize("You win", "urgent: please call me");
        assert_eq!(out.category, Category::ToDo);
    }

    #[test]
    fn default_is_important() {
        let out = engine().categorize("Hello", "Just saying hello.");
        assert_eq!(out.category, Category::Important);
        assert_eq!(out.reason, DEFAULT_REASON);
    }

    #[test]
    fn categorization_is_deterministic() {
        let a = engine().categorize("Quarterly", "Budget numbers attached, confirm asap");
        let b = engine().categorize("Quarterly", "Budget numbers attached, confirm asap");
        assert_eq!(a, b);
    }

    #[test]
    fn categorization_matches_case_insensitively() {
        let out = engine().categorize("", "NEWSLETTER: Top stories");
        assert_eq!(out.category, Category::Newsletter);
    }

    // ── Extraction ──────────────────────────────────────────────────

    #[test]
    fn extraction_collects_all_matches_in_order() {
        let items = engine().extract_actions(
            "Please rsvp and join the meeting; review the doc and upload your notes",
            None,
        );
        let tasks: Vec<&str> = items.iter().map(|i| i.task.as_str()).collect();
        assert_eq!(
            tasks,
            vec![
                "Confirm meeting attendance and schedule",
                "Review and provide feedback",
                "Complete and submit required items",
                "RSVP for event",
            ]
        );
        assert!(items.iter().all(|i| i.deadline.is_none()));
    }

    #[test]
    fn extraction_meeting_and_rsvp() {
        let items = engine().extract_actions("Team meeting next week, please RSVP", None);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].task, "Confirm meeting attendance and schedule");
        assert_eq!(items[1].task, "RSVP for event");
    }

    #[test]
    fn extraction_deadlines_offset_from_reference() {
        let items = engine().extract_actions("meeting review rsvp", Some(date(2025, 11, 25)));
        assert_eq!(items[0].deadline, Some(date(2025, 11, 28)));
        assert_eq!(items[1].deadline, Some(date(2025, 11, 30)));
        assert_eq!(items[2].deadline, Some(date(2025, 11, 27)));
    }

    #[test]
    fn extraction_uses_configured_offsets() {
        let policy = DeadlinePolicy {
            meeting_days: 1,
            review_days: 10,
            submit_days: 0,
            rsvp_days: 7,
        };
        let items = RuleEngine::new(policy).extract_actions("submit it", Some(date(2025, 1, 31)));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].deadline, Some(date(2025, 1, 31)));
    }

    #[test]
    fn extraction_empty_when_nothing_matches() {
        assert!(engine().extract_actions("Thanks!", None).is_empty());
    }

    // ── Summaries ───────────────────────────────────────────────────

    #[test]
    fn summary_lists_observations() {
        let summary = engine().summarize("Budget meeting before the deadline");
        assert!(summary.contains("financial/budget"));
        assert!(summary.contains("Meeting or schedule"));
        assert!(summary.contains("Time-sensitive"));
        assert!(summary.contains("Action Required"));
    }

    #[test]
    fn summary_never_empty() {
        let summary = engine().summarize("hi");
        assert!(summary.contains("General communication"));
    }

    // ── decide() ────────────────────────────────────────────────────

    #[test]
    fn decide_categorize_emits_json() {
        let ctx = DecisionContext::new().with_message("Sync", "Let's set a meeting");
        let raw = engine().decide(DEFAULT_CATEGORIZATION_PROMPT, &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["category"], "To-Do");
        assert_eq!(value["reason"], "Meeting request requiring response");
    }

    #[test]
    fn decide_extract_emits_array_with_dates() {
        let ctx = DecisionContext::new()
            .with_message("RSVP", "please rsvp")
            .with_reference_date(date(2025, 11, 25));
        let raw = engine().decide(DEFAULT_ACTION_ITEM_PROMPT, &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["task"], "RSVP for event");
        assert_eq!(value[0]["deadline"], "2025-11-27");
    }

    #[test]
    fn decide_extract_with_no_matches_is_empty_array() {
        let ctx = DecisionContext::new().with_message("Hi", "hello");
        let raw = engine().decide(DEFAULT_ACTION_ITEM_PROMPT, &ctx).unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn decide_draft_respects_tone() {
        let ctx = DecisionContext::new()
            .with_message("Quarterly report", "Here is the report you asked for.")
            .with_tone("friendly");
        let raw = engine().decide(DEFAULT_AUTO_REPLY_PROMPT, &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["subject"], "Re: Quarterly report");
        assert!(value["body"].as_str().unwrap().starts_with("Hi,"));

        let ctx = ctx.with_tone("professional");
        let raw = engine().decide(DEFAULT_AUTO_REPLY_PROMPT, &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["body"].as_str().unwrap().starts_with("Dear Sir/Madam,"));
    }

    #[test]
    fn decide_summarize_returns_text() {
        let ctx = DecisionContext::new().with_message("Budget", "$5k budget");
        let raw = engine().decide(SUMMARY_INTENT, &ctx).unwrap();
        assert!(raw.starts_with("**Email Summary:**"));
    }

    #[test]
    fn decide_without_body_still_answers() {
        let raw = engine()
            .decide(DEFAULT_CATEGORIZATION_PROMPT, &DecisionContext::new())
            .unwrap();
        assert!(raw.contains("Important"));
    }

    #[test]
    fn keyword_set_escapes_terms() {
        let set = KeywordSet::new(&["$", "act now"]);
        assert!(set.is_match("costs $5"));
        assert!(set.is_match("ACT NOW!"));
        assert!(!set.is_match("action"));
        assert_eq!(set.terms().len(), 2);
        assert!(!KeywordSet::new(&[]).is_match("anything"));
    }
}
