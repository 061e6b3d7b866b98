//! Inbox data model: messages with their category and action items.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Triage category assigned to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Important,
    #[serde(rename = "To-Do")]
    ToDo,
    Newsletter,
    Spam,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Important,
        Category::ToDo,
        Category::Newsletter,
        Category::Spam,
    ];

    /// Label as it appears in documents and engine output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Important => "Important",
            Self::ToDo => "To-Do",
            Self::Newsletter => "Newsletter",
            Self::Spam => "Spam",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "important" => Ok(Self::Important),
            "to-do" | "todo" | "to_do" => Ok(Self::ToDo),
            "newsletter" => Ok(Self::Newsletter),
            "spam" => Ok(Self::Spam),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// A task extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// What needs doing.
    pub task: String,
    /// When it is due, if known.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl ActionItem {
    pub fn new(task: impl Into<String>, deadline: Option<NaiveDate>) -> Self {
        Self {
            task: task.into(),
            deadline,
        }
    }

    /// Build from a loosely-shaped JSON value.
    ///
    /// Requires an object with a non-empty `task` string. A deadline that is
    /// missing, null, or not a `YYYY-MM-DD` date becomes `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let task = value.get("task")?.as_str()?.trim();
        if task.is_empty() {
            return None;
        }
        let deadline = value
            .get("deadline")
            .and_then(|d| d.as_str())
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
        Some(Self::new(task, deadline))
    }
}

/// An email in the inbox snapshot.
///
/// The identity fields are fixed once loaded; `category` and `actions` are
/// filled in by a processing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Timestamp as it appears in the snapshot (free-form).
    pub timestamp: String,
    /// Unknown labels load as uncategorized.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    /// Unusable items are dropped; unparseable deadlines become `None`.
    #[serde(default, alias = "action_items", deserialize_with = "lenient_actions")]
    pub actions: Vec<ActionItem>,
}

fn lenient_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Category>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|label| label.parse().ok()))
}

fn lenient_actions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ActionItem>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_array())
        .map(|items| items.iter().filter_map(ActionItem::from_value).collect())
        .unwrap_or_default())
}

impl Message {
    /// Create an unprocessed message.
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            timestamp: timestamp.into(),
            category: None,
            actions: Vec::new(),
        }
    }

    /// Whether a processing pass has assigned a category.
    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }
}
