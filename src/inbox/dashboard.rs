//! Text views over the inbox and draft list.

use std::collections::BTreeSet;

use crate::drafts::ReplyDraft;
use crate::inbox::model::{Category, Message};

/// Counts shown in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InboxStats {
    pub total: usize,
    pub categorized: usize,
    /// Messages categorized as `To-Do`.
    pub todos: usize,
}

impl InboxStats {
    pub fn compute(messages: &[Message]) -> Self {
        Self {
            total: messages.len(),
            categorized: messages.iter().filter(|m| m.is_categorized()).count(),
            todos: messages
                .iter()
                .filter(|m| m.category == Some(Category::ToDo))
                .count(),
        }
    }
}

/// Categories present in the inbox, sorted and deduplicated.
pub fn present_categories(messages: &[Message]) -> Vec<Category> {
    messages
        .iter()
        .filter_map(|m| m.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Messages whose category is in `selected`. An empty selection keeps everything.
pub fn filter_by_category<'a>(messages: &'a [Message], selected: &[Category]) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| selected.is_empty() || m.category.is_some_and(|c| selected.contains(&c)))
        .collect()
}

/// Emoji badge for a category.
pub fn category_badge(category: Option<Category>) -> String {
    match category {
        Some(Category::Important) => "🔴 Important".to_string(),
        Some(Category::ToDo) => "📝 To-Do".to_string(),
        Some(Category::Newsletter) => "📰 Newsletter".to_string(),
        Some(Category::Spam) => "🗑️ Spam".to_string(),
        None => "📧 Uncategorized".to_string(),
    }
}

/// One line per message.
pub fn render_inbox(messages: &[&Message]) -> String {
    if messages.is_empty() {
        return "No emails to show. Run `load` first.".to_string();
    }
    messages
        .iter()
        .map(|m| {
            let subject: String = m.subject.chars().take(60).collect();
            format!(
                "[{}] {:<18} {:<28} {}",
                m.id,
                category_badge(m.category),
                truncate(&m.sender, 28),
                subject
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full view of a single message.
pub fn render_detail(message: &Message) -> String {
    let mut out = String::with_capacity(message.body.len() + 256);
    out.push_str(&format!("# {}\n", message.subject));
    out.push_str(&format!("From: {}\n", message.sender));
    out.push_str(&format!("To:   {}\n", message.recipient));
    out.push_str(&format!("Date: {}\n", message.timestamp));
    if message.category.is_some() {
        out.push_str(&format!("Tag:  {}\n", category_badge(message.category)));
    }
    out.push_str(&format!("\n{}\n", message.body));

    if !message.actions.is_empty() {
        out.push_str("\nAction items:\n");
        for (idx, action) in message.actions.iter().enumerate() {
            let deadline = action
                .deadline
                .map(|d| d.to_string())
                .unwrap_or_else(|| "No deadline".to_string());
            out.push_str(&format!("  {}. {} (deadline: {})\n", idx + 1, action.task, deadline));
        }
    }
    out
}

/// Saved drafts, newest first.
pub fn render_drafts(drafts: &[ReplyDraft]) -> String {
    if drafts.is_empty() {
        return "No drafts yet. Use `reply <id>` or `new` to create one.".to_string();
    }
    let mut out = String::new();
    for draft in drafts.iter().rev() {
        out.push_str(&format!(
            "── {} · {} · {}\n",
            draft.id,
            draft.subject,
            draft.created_at.format("%Y-%m-%d %H:%M")
        ));
        if let Some(ref email_id) = draft.email_id {
            out.push_str(&format!("In reply to: {}\n", email_id));
        }
        out.push_str(&format!("{}\n", draft.body));
        let follow_ups = draft.follow_ups();
        if !follow_ups.is_empty() {
            out.push_str("Suggested follow-ups:\n");
            for f in follow_ups {
                out.push_str(&format!("  • {}\n", f));
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
