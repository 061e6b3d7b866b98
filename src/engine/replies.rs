//! Canned reply texts: draft templates and scripted chat answers.

use serde::{Deserialize, Serialize};

/// Reply draft as the engine emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOutput {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub suggested_follow_ups: Vec<String>,
}

/// Which template a draft is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    MeetingConfirmation,
    PartnershipInterest,
    Acknowledgement,
}

impl DraftKind {
    /// Pick a template from the lower-cased body.
    pub fn for_body(body_lower: &str) -> Self {
        if body_lower.contains("meeting") || body_lower.contains("schedule") {
            Self::MeetingConfirmation
        } else if body_lower.contains("partnership") || body_lower.contains("collaboration") {
            Self::PartnershipInterest
        } else {
            Self::Acknowledgement
        }
    }

    fn fallback_subject(&self) -> &'static str {
        match self {
            Self::MeetingConfirmation => "Meeting",
            Self::PartnershipInterest => "Partnership",
            Self::Acknowledgement => "Your Email",
        }
    }
}

/// Build a reply draft. Only `"friendly"` switches to the informal phrasing.
pub fn build_draft(kind: DraftKind, subject: Option<&str>, tone: Option<&str>) -> DraftOutput {
    let friendly = tone.is_some_and(|t| t == "friendly");
    let subject = format!("Re: {}", subject.unwrap_or(kind.fallback_subject()));

    let (body, follow_ups): (String, Vec<&str>) = match kind {
        DraftKind::MeetingConfirmation => {
            let body = if friendly {
                "Hi,\n\nThank you for the meeting invite! I'd be happy to join. \
                 Could you please share the agenda and meeting details?\n\n\
                 Looking forward to it!\n\nBest regards"
            } else {
                "Dear Sir/Madam,\n\nThank you for your email. I confirm my availability for the meeting. \
                 Kindly share the agenda and necessary details.\n\nRegards"
            };
            (
                body.to_string(),
                vec![
                    "Request meeting agenda",
                    "Confirm calendar availability",
                    "Ask about other participants",
                ],
            )
        }
        DraftKind::PartnershipInterest => (
            "Dear Sir/Madam,\n\nThank you for reaching out. We're interested in exploring this opportunity. \
             Could we schedule a call next week to discuss further?\n\n\
             Please let me know your availability.\n\nBest regards"
                .to_string(),
            vec![
                "Schedule introductory call",
                "Share company information",
                "Discuss terms",
            ],
        ),
        DraftKind::Acknowledgement => {
            let (greeting, closing) = if friendly {
                ("Hi", "Best regards")
            } else {
                ("Dear Sir/Madam", "Regards")
            };
            (
                format!(
                    "{greeting},\n\nThank you for your email. I have received your message and will \
                     review it carefully. I'll get back to you shortly.\n\n{closing}"
                ),
                vec!["Provide requested information", "Schedule follow-up"],
            )
        }
    };

    DraftOutput {
        subject,
        body,
        suggested_follow_ups: follow_ups.iter().map(|s| s.to_string()).collect(),
    }
}

/// Scripted answer to a chat query. Does not look at the inbox.
pub fn answer_query(query: &str) -> String {
    let query = query.to_lowercase();
    if query.contains("urgent") {
        "Found 2 urgent emails in your inbox:\n\
         1. Budget Meeting - $500K allocation\n\
         2. Performance Review - Deadline Nov 30"
            .to_string()
    } else if query.contains("task") || query.contains("todo") {
        "**Your pending tasks:**\n\n\
         1. Meeting confirmation (Due: Nov 28)\n\
         2. Code review feedback (Due: Nov 27)\n\
         3. Performance review (Due: Nov 30)\n\
         4. Speaker presentation (Due: Dec 5)"
            .to_string()
    } else {
        "Processed your query. Please provide more details for better assistance.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_selection_order() {
        assert_eq!(
            DraftKind::for_body("let's schedule a partnership meeting"),
            DraftKind::MeetingConfirmation
        );
        assert_eq!(
            DraftKind::for_body("open to a collaboration?"),
            DraftKind::PartnershipInterest
        );
        assert_eq!(DraftKind::for_body("thanks for the update"), DraftKind::Acknowledgement);
    }

    #[test]
    fn acknowledgement_tone() {
        let friendly = build_draft(DraftKind::Acknowledgement, Some("Update"), Some("friendly"));
        assert!(friendly.body.starts_with("Hi,"));
        assert!(friendly.body.ends_with("Best regards"));

        let formal = build_draft(DraftKind::Acknowledgement, Some("Update"), Some("formal"));
        assert!(formal.body.starts_with("Dear Sir/Madam,"));
        assert!(formal.body.ends_with("Regards"));

        let unset = build_draft(DraftKind::Acknowledgement, Some("Update"), None);
        assert!(unset.body.starts_with("Dear Sir/Madam,"));
    }

    #[test]
    fn meeting_draft_has_three_follow_ups() {
        let draft = build_draft(DraftKind::MeetingConfirmation, Some("Sync"), Some("friendly"));
        assert_eq!(draft.subject, "Re: Sync");
        assert!(draft.body.contains("meeting invite"));
        assert_eq!(draft.suggested_follow_ups.len(), 3);
    }

    #[test]
    fn partnership_draft_ignores_tone() {
        let draft = build_draft(DraftKind::PartnershipInterest, None, Some("friendly"));
        assert_eq!(draft.subject, "Re: Partnership");
        assert!(draft.body.starts_with("Dear Sir/Madam,"));
    }

    #[test]
    fn query_answers() {
        assert!(answer_query("Anything URGENT?").starts_with("Found 2 urgent emails"));
        assert!(answer_query("show my todo list").contains("pending tasks"));
        assert!(answer_query("what's the weather").contains("more details"));
    }
}
