//! Terminal dashboard: line commands over an in-memory session.
//!
//! The session owns the loaded inbox, the selected message, the active
//! prompt set and the chat history. Drafts and prompts go through the store;
//! processed messages live only in memory.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::EmailAgent;
use crate::config::AppConfig;
use crate::drafts::ReplyDraft;
use crate::engine::{EngineHandle, create_engine};
use crate::inbox::dashboard::{self, InboxStats};
use crate::inbox::model::{Category, Message};
use crate::pipeline::EmailProcessor;
use crate::prompts::{PromptSlot, PromptTemplates};
use crate::store::{JsonStore, Store};

pub const HELP: &str = "\
Commands:
  load                              Load the inbox snapshot
  process                           Categorize emails and extract action items
  inbox [categories...]             List emails, optionally filtered (e.g. `inbox todo spam`)
  stats                             Show inbox counts
  show <id>                         Show one email with its action items
  select <id>|none                  Set the email chat queries refer to
  reply <id> [tone]                 Draft and save a reply (tone: professional, friendly, formal)
  new <to> | <subject> | <instruction>
                                    Draft and save a new email
  drafts                            List saved drafts
  delete <draft-id>                 Delete a saved draft
  prompts                           Show the active prompts
  prompt <slot> <text>              Replace a prompt (slot: categorization, actions, reply)
  reset-prompts                     Restore the built-in prompts
  help                              Show this help
  quit                              Exit
Anything else is sent to the email agent as a chat query.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Process,
    Inbox { categories: Vec<Category> },
    Stats,
    Show { id: String },
    Select { id: Option<String> },
    Reply { id: String, tone: Option<String> },
    New {
        to: String,
        subject: String,
        instruction: String,
    },
    Drafts,
    Delete { id: String },
    Prompts,
    SetPrompt { slot: PromptSlot, text: String },
    ResetPrompts,
    Help,
    Quit,
    /// Free text for the agent.
    Chat { query: String },
    /// A command word with unusable arguments.
    Invalid { message: String },
    Empty,
}

impl Command {
    /// Parse one input line. Never fails: unrecognised input is a chat query.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };

        let parsed = match head.to_lowercase().as_str() {
            "load" if rest.is_empty() => Some(Ok(Self::Load)),
            "process" if rest.is_empty() => Some(Ok(Self::Process)),
            "stats" if rest.is_empty() => Some(Ok(Self::Stats)),
            "drafts" if rest.is_empty() => Some(Ok(Self::Drafts)),
            "prompts" if rest.is_empty() => Some(Ok(Self::Prompts)),
            "reset-prompts" if rest.is_empty() => Some(Ok(Self::ResetPrompts)),
            "help" | "?" if rest.is_empty() => Some(Ok(Self::Help)),
            "quit" | "exit" if rest.is_empty() => Some(Ok(Self::Quit)),
            "inbox" => parse_inbox(rest),
            "show" => single_arg(rest, "show <id>").map(|r| r.map(|id| Self::Show { id })),
            "select" => parse_select(rest),
            "delete" => {
                single_arg(rest, "delete <draft-id>").map(|r| r.map(|id| Self::Delete { id }))
            }
            "reply" => parse_reply(rest),
            "new" => parse_new(rest),
            "prompt" => Some(parse_prompt(rest)),
            _ => None,
        };

        match parsed {
            Some(Ok(command)) => command,
            Some(Err(message)) => Self::Invalid { message },
            None => Self::Chat {
                query: trimmed.to_string(),
            },
        }
    }
}

// Helpers return `None` when the line reads like prose rather than a
// command, so it goes to the agent instead.
type Parsed = Option<Result<Command, String>>;

fn usage(form: &str) -> String {
    format!("Usage: {form}")
}

/// Exactly one argument. No argument is a usage error; several is prose.
fn single_arg(rest: &str, form: &str) -> Option<Result<String, String>> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) => Some(Err(usage(form))),
        (Some(arg), None) => Some(Ok(arg.to_string())),
        _ => None,
    }
}

fn parse_inbox(rest: &str) -> Parsed {
    let categories: Result<Vec<Category>, String> =
        rest.split_whitespace().map(str::parse).collect();
    categories.ok().map(|categories| Ok(Command::Inbox { categories }))
}

fn parse_select(rest: &str) -> Parsed {
    single_arg(rest, "select <id>|none").map(|r| {
        r.map(|id| Command::Select {
            id: (!id.eq_ignore_ascii_case("none")).then_some(id),
        })
    })
}

fn parse_reply(rest: &str) -> Parsed {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [] => Some(Err(usage("reply <id> [tone]"))),
        [id] => Some(Ok(Command::Reply {
            id: id.to_string(),
            tone: None,
        })),
        [id, tone] => Some(Ok(Command::Reply {
            id: id.to_string(),
            tone: Some(tone.to_lowercase()),
        })),
        _ => None,
    }
}

fn parse_new(rest: &str) -> Parsed {
    let form = "new <to> | <subject> | <instruction>";
    if rest.is_empty() {
        return Some(Err(usage(form)));
    }
    let parts: Vec<&str> = rest.splitn(3, '|').map(str::trim).collect();
    let [to, subject, instruction] = parts.as_slice() else {
        return None;
    };
    if instruction.is_empty() {
        return Some(Err(usage(form)));
    }
    Some(Ok(Command::New {
        to: to.to_string(),
        subject: subject.to_string(),
        instruction: instruction.to_string(),
    }))
}

fn parse_prompt(rest: &str) -> Result<Command, String> {
    let form = "prompt <categorization|actions|reply> <text>";
    let Some((slot, text)) = rest.split_once(char::is_whitespace) else {
        return Err(usage(form));
    };
    let slot: PromptSlot = slot.parse()?;
    let text = text.trim();
    if text.is_empty() {
        return Err(usage(form));
    }
    Ok(Command::SetPrompt {
        slot,
        text: text.to_string(),
    })
}

/// One chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub query: String,
    pub answer: String,
}

/// Interactive session over one store and engine.
pub struct Dashboard {
    store: Arc<dyn Store>,
    processor: EmailProcessor,
    agent: EmailAgent,
    engine_name: String,
    default_tone: String,
    messages: Vec<Message>,
    selected: Option<String>,
    prompts: PromptTemplates,
    chat_history: Vec<ChatTurn>,
}

impl Dashboard {
    /// Open the configured data directory and engine.
    pub async fn open(config: &AppConfig) -> crate::error::Result<Self> {
        let store: Arc<dyn Store> = Arc::new(JsonStore::open(&config.data_dir).await?);
        let engine = create_engine(config);
        Ok(Self::new(config, store, engine).await)
    }

    /// Start a session, loading the stored prompts.
    pub async fn new(config: &AppConfig, store: Arc<dyn Store>, engine: EngineHandle) -> Self {
        let prompts = store.load_prompts().await;
        Self {
            processor: EmailProcessor::new(engine.clone()),
            engine_name: engine.name().to_string(),
            agent: EmailAgent::new(engine),
            default_tone: config.default_tone.clone(),
            store,
            messages: Vec::new(),
            selected: None,
            prompts,
            chat_history: Vec::new(),
        }
    }

    /// Builder: replace the processor (e.g. to pin the deadline reference date).
    pub fn with_processor(mut self, processor: EmailProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn selected(&self) -> Option<&Message> {
        let id = self.selected.as_deref()?;
        self.find(id)
    }

    pub fn prompts(&self) -> &PromptTemplates {
        &self.prompts
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    fn find(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Run one command and return the text to print.
    pub async fn execute(&mut self, command: Command) -> String {
        debug!(?command, "Executing command");
        match command {
            Command::Load => self.load().await,
            Command::Process => self.process(),
            Command::Inbox { categories } => self.inbox(&categories),
            Command::Stats => self.stats(),
            Command::Show { id } => match self.find(&id) {
                Some(message) => dashboard::render_detail(message),
                None => not_found(&id),
            },
            Command::Select { id: None } => {
                self.selected = None;
                "Selection cleared.".to_string()
            }
            Command::Select { id: Some(id) } => match self.find(&id) {
                Some(message) => {
                    let text = format!("Selected [{}] {}", message.id, message.subject);
                    self.selected = Some(id);
                    text
                }
                None => not_found(&id),
            },
            Command::Reply { id, tone } => self.reply(&id, tone).await,
            Command::New {
                to,
                subject,
                instruction,
            } => {
                let draft = self.agent.generate_new_draft(&instruction, &to, &subject);
                self.persist_draft(draft).await
            }
            Command::Drafts => dashboard::render_drafts(&self.store.load_drafts().await),
            Command::Delete { id } => match self.store.delete_draft(&id).await {
                Ok(()) => format!("Deleted draft {id}."),
                Err(e) => {
                    warn!(id = %id, error = %e, "Draft delete failed");
                    format!("Could not delete draft {id}: {e}")
                }
            },
            Command::Prompts => render_prompts(&self.prompts),
            Command::SetPrompt { slot, text } => {
                self.prompts.set(slot, text);
                self.save_prompts(&format!("Updated the {slot} prompt.")).await
            }
            Command::ResetPrompts => {
                self.prompts = self.store.default_prompts();
                self.save_prompts("Prompts reset to defaults.").await
            }
            Command::Help => HELP.to_string(),
            Command::Quit => "Goodbye.".to_string(),
            Command::Chat { query } => self.chat(query),
            Command::Invalid { message } => message,
            Command::Empty => String::new(),
        }
    }

    async fn load(&mut self) -> String {
        self.messages = self.store.load_inbox().await;
        self.selected = None;
        info!(count = self.messages.len(), "Inbox loaded");
        if self.messages.is_empty() {
            "Inbox is empty.".to_string()
        } else {
            format!("Loaded {} emails.", self.messages.len())
        }
    }

    fn process(&mut self) -> String {
        if self.messages.is_empty() {
            return "No emails loaded. Run `load` first.".to_string();
        }
        let summary = self.processor.process_emails(&mut self.messages, &self.prompts);
        let mut out = format!("Processed {} emails.", summary.processed);
        if summary.category_fallbacks + summary.action_fallbacks > 0 {
            out.push_str(&format!(
                " ({} defaulted to Important, {} without usable actions)",
                summary.category_fallbacks, summary.action_fallbacks
            ));
        }
        out.push('\n');
        out.push_str(&self.stats());
        out
    }

    fn inbox(&self, categories: &[Category]) -> String {
        let shown = dashboard::filter_by_category(&self.messages, categories);
        if shown.is_empty() && !self.messages.is_empty() {
            return "No emails in the selected categories.".to_string();
        }
        let mut out = dashboard::render_inbox(&shown);
        let present = dashboard::present_categories(&self.messages);
        if !present.is_empty() {
            let labels: Vec<&str> = present.iter().map(|c| c.as_str()).collect();
            out.push_str(&format!("\n\nCategories: {}", labels.join(", ")));
        }
        out
    }

    fn stats(&self) -> String {
        let stats = InboxStats::compute(&self.messages);
        format!(
            "Total: {} | Categorized: {} | To-Do: {}",
            stats.total, stats.categorized, stats.todos
        )
    }

    async fn reply(&self, id: &str, tone: Option<String>) -> String {
        let tone = tone.unwrap_or_else(|| self.default_tone.clone());
        let Some(message) = self.find(id) else {
            return not_found(id);
        };
        let draft = self.agent.generate_reply_draft(message, &self.prompts, &tone);
        self.persist_draft(draft).await
    }

    async fn persist_draft(&self, draft: ReplyDraft) -> String {
        let rendered = render_draft(&draft);
        match self.store.save_draft(&draft).await {
            Ok(()) => format!("Saved draft {}\n\n{rendered}", draft.id),
            Err(e) => {
                warn!(id = %draft.id, error = %e, "Draft save failed");
                format!("Draft generated but not saved ({e})\n\n{rendered}")
            }
        }
    }

    async fn save_prompts(&self, done: &str) -> String {
        match self.store.save_prompts(&self.prompts).await {
            Ok(()) => done.to_string(),
            Err(e) => {
                warn!(error = %e, "Prompt save failed");
                format!("{done} Not saved: {e}")
            }
        }
    }

    fn chat(&mut self, query: String) -> String {
        let answer = self.agent.run_query(&query, self.selected(), &self.prompts);
        self.chat_history.push(ChatTurn {
            query,
            answer: answer.clone(),
        });
        answer
    }
}

fn not_found(id: &str) -> String {
    format!("No email with id {id}.")
}

fn render_draft(draft: &ReplyDraft) -> String {
    let mut out = format!("Subject: {}\n\n{}", draft.subject, draft.body);
    let follow_ups = draft.follow_ups();
    if !follow_ups.is_empty() {
        out.push_str("\n\nSuggested follow-ups:");
        for f in follow_ups {
            out.push_str(&format!("\n• {f}"));
        }
    }
    out
}

fn render_prompts(prompts: &PromptTemplates) -> String {
    [
        PromptSlot::Categorization,
        PromptSlot::ActionItems,
        PromptSlot::AutoReply,
    ]
    .iter()
    .map(|slot| format!("[{slot}]\n{}", prompts.get(*slot)))
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// Startup banner.
pub fn banner(config: &AppConfig, engine_name: &str) -> String {
    format!(
        "📬 Inbox Agent v{}\n   Data: {}\n   Engine: {}\n   Type `help` for commands, `quit` to exit.\n",
        env!("CARGO_PKG_VERSION"),
        config.data_dir.display(),
        engine_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::json::paths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("load"), Command::Load);
        assert_eq!(Command::parse("  PROCESS "), Command::Process);
        assert_eq!(Command::parse("stats"), Command::Stats);
        assert_eq!(Command::parse("drafts"), Command::Drafts);
        assert_eq!(Command::parse("reset-prompts"), Command::ResetPrompts);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn parse_inbox_filters() {
        assert_eq!(Command::parse("inbox"), Command::Inbox { categories: vec![] });
        assert_eq!(
            Command::parse("inbox todo Spam"),
            Command::Inbox {
                categories: vec![Category::ToDo, Category::Spam]
            }
        );
        assert!(matches!(
            Command::parse("inbox zero tips please"),
            Command::Chat { .. }
        ));
    }

    #[test]
    fn parse_id_commands() {
        assert_eq!(Command::parse("show 3"), Command::Show { id: "3".into() });
        assert_eq!(Command::parse("select none"), Command::Select { id: None });
        assert_eq!(
            Command::parse("select 2"),
            Command::Select {
                id: Some("2".into())
            }
        );
        assert!(matches!(Command::parse("show"), Command::Invalid { .. }));
        assert!(matches!(
            Command::parse("show me urgent emails"),
            Command::Chat { .. }
        ));
    }

    #[test]
    fn parse_reply_with_tone() {
        assert_eq!(
            Command::parse("reply 1 Friendly"),
            Command::Reply {
                id: "1".into(),
                tone: Some("friendly".into())
            }
        );
        assert_eq!(
            Command::parse("reply 1"),
            Command::Reply {
                id: "1".into(),
                tone: None
            }
        );
        assert!(matches!(
            Command::parse("reply to the budget email for me"),
            Command::Chat { .. }
        ));
    }

    #[test]
    fn parse_new_draft() {
        assert_eq!(
            Command::parse("new team@x.com | Status | Ask for an update | today"),
            Command::New {
                to: "team@x.com".into(),
                subject: "Status".into(),
                instruction: "Ask for an update | today".into(),
            }
        );
        assert!(matches!(Command::parse("new"), Command::Invalid { .. }));
        assert!(matches!(
            Command::parse("new a@x.com | Hi |"),
            Command::Invalid { .. }
        ));
        assert!(matches!(
            Command::parse("new ideas for the newsletter?"),
            Command::Chat { .. }
        ));
    }

    #[test]
    fn parse_prompt_edit() {
        assert_eq!(
            Command::parse("prompt reply Draft a short reply."),
            Command::SetPrompt {
                slot: PromptSlot::AutoReply,
                text: "Draft a short reply.".into()
            }
        );
        match Command::parse("prompt tone whatever") {
            Command::Invalid { message } => assert!(message.contains("Unknown prompt slot")),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(matches!(
            Command::parse("prompt reply"),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn anything_else_is_chat() {
        assert_eq!(
            Command::parse("What are my tasks?"),
            Command::Chat {
                query: "What are my tasks?".into()
            }
        );
    }

    // ── Session ─────────────────────────────────────────────────────

    fn inbox_fixture() -> Vec<Message> {
        vec![
            Message::new(
                "1",
                "cfo@example.com",
                "me@example.com",
                "Budget approval",
                "Please review the attached budget request, $50,000, urgent approval needed",
                "2025-11-25T09:00:00",
            ),
            Message::new(
                "2",
                "news@example.com",
                "me@example.com",
                "Weekly digest",
                "Here is your newsletter. Unsubscribe anytime.",
                "2025-11-25T10:00:00",
            ),
            Message::new(
                "3",
                "promo@example.com",
                "me@example.com",
                "You are a winner",
                "Claim your prize now!",
                "2025-11-25T11:00:00",
            ),
        ]
    }

    async fn session() -> (Dashboard, TempDir) {
        let dir = TempDir::new().unwrap();
        let inbox = serde_json::to_string_pretty(&inbox_fixture()).unwrap();
        std::fs::write(dir.path().join(paths::INBOX), inbox).unwrap();

        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            debug: false,
            ..AppConfig::default()
        };
        let store: Arc<dyn Store> = Arc::new(JsonStore::open(dir.path()).await.unwrap());
        let engine = create_engine(&config);
        let processor = EmailProcessor::new(engine.clone())
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
        let dashboard = Dashboard::new(&config, store, engine)
            .await
            .with_processor(processor);
        (dashboard, dir)
    }

    #[tokio::test]
    async fn open_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };
        let dash = Dashboard::open(&config).await.unwrap();
        assert!(config.data_dir.is_dir());
        assert_eq!(dash.engine_name(), "rules");
        assert!(banner(&config, dash.engine_name()).contains("Engine: rules"));
    }

    #[tokio::test]
    async fn process_requires_load() {
        let (mut dash, _dir) = session().await;
        let out = dash.execute(Command::Process).await;
        assert!(out.contains("Run `load` first"));
    }

    #[tokio::test]
    async fn load_process_and_filter() {
        let (mut dash, _dir) = session().await;
        assert_eq!(dash.execute(Command::Load).await, "Loaded 3 emails.");

        let out = dash.execute(Command::Process).await;
        assert!(out.starts_with("Processed 3 emails."));
        assert!(out.contains("Total: 3 | Categorized: 3 | To-Do: 1"));

        let categories: Vec<Option<Category>> =
            dash.messages().iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![
                Some(Category::ToDo),
                Some(Category::Newsletter),
                Some(Category::Spam)
            ]
        );

        let out = dash
            .execute(Command::Inbox {
                categories: vec![Category::Spam],
            })
            .await;
        assert!(out.contains("You are a winner"));
        assert!(!out.contains("Budget approval"));
        assert!(out.contains("Categories: To-Do, Newsletter, Spam"));

        let out = dash
            .execute(Command::Inbox {
                categories: vec![Category::Important],
            })
            .await;
        assert_eq!(out, "No emails in the selected categories.");
    }

    #[tokio::test]
    async fn show_lists_action_items() {
        let (mut dash, _dir) = session().await;
        dash.execute(Command::Load).await;
        dash.execute(Command::Process).await;
        let out = dash.execute(Command::Show { id: "1".into() }).await;
        assert!(out.contains("Review and provide feedback (deadline: 2025-11-30)"));

        let out = dash.execute(Command::Show { id: "nope".into() }).await;
        assert_eq!(out, "No email with id nope.");
    }

    #[tokio::test]
    async fn reply_saves_draft_then_delete() {
        let (mut dash, _dir) = session().await;
        dash.execute(Command::Load).await;
        let out = dash
            .execute(Command::Reply {
                id: "1".into(),
                tone: Some("friendly".into()),
            })
            .await;
        assert!(out.starts_with("Saved draft draft_"));
        assert!(out.contains("Subject: Re: Budget approval"));

        let drafts = dash.store.load_drafts().await;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].email_id.as_deref(), Some("1"));

        let listing = dash.execute(Command::Drafts).await;
        assert!(listing.contains("Re: Budget approval"));

        let id = drafts[0].id.clone();
        let out = dash.execute(Command::Delete { id: id.clone() }).await;
        assert_eq!(out, format!("Deleted draft {id}."));
        assert!(dash.store.load_drafts().await.is_empty());
    }

    #[tokio::test]
    async fn reply_uses_configured_default_tone() {
        let (mut dash, _dir) = session().await;
        dash.execute(Command::Load).await;
        let out = dash
            .execute(Command::Reply {
                id: "1".into(),
                tone: None,
            })
            .await;
        // Default tone is professional.
        assert!(out.contains("Dear Sir/Madam,"));
    }

    #[tokio::test]
    async fn new_draft_is_saved_without_source() {
        let (mut dash, _dir) = session().await;
        dash.execute(Command::New {
            to: "team@example.com".into(),
            subject: "".into(),
            instruction: "Ask for a status update".into(),
        })
        .await;
        let drafts = dash.store.load_drafts().await;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].subject, "New Email");
        assert!(drafts[0].email_id.is_none());
    }

    #[tokio::test]
    async fn prompt_edits_persist_and_reset() {
        let (mut dash, dir) = session().await;
        let out = dash
            .execute(Command::SetPrompt {
                slot: PromptSlot::AutoReply,
                text: "Draft a cheerful reply.".into(),
            })
            .await;
        assert_eq!(out, "Updated the reply prompt.");

        let reopened = JsonStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.load_prompts().await.auto_reply_prompt,
            "Draft a cheerful reply."
        );

        dash.execute(Command::ResetPrompts).await;
        assert_eq!(dash.prompts(), &PromptTemplates::default());
        assert_eq!(reopened.load_prompts().await, PromptTemplates::default());
    }

    #[tokio::test]
    async fn chat_uses_selection_and_keeps_history() {
        let (mut dash, _dir) = session().await;
        dash.execute(Command::Load).await;
        dash.execute(Command::Select {
            id: Some("1".into()),
        })
        .await;
        assert_eq!(dash.selected().map(|m| m.id.as_str()), Some("1"));

        let answer = dash
            .execute(Command::Chat {
                query: "Summarize this".into(),
            })
            .await;
        assert!(answer.contains("financial/budget"));

        dash.execute(Command::Select { id: None }).await;
        assert!(dash.selected().is_none());

        dash.execute(Command::Chat {
            query: "any urgent mail?".into(),
        })
        .await;
        assert_eq!(dash.chat_history().len(), 2);
        assert_eq!(dash.chat_history()[1].query, "any urgent mail?");
    }
}
