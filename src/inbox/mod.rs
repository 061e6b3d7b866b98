//! Inbox snapshot: messages plus the views the dashboard renders over them.

pub mod dashboard;
pub mod model;

pub use model::{ActionItem, Category, Message};
