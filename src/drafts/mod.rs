//! Reply drafts produced by the agent and persisted by the store.

pub mod model;

pub use model::{FOLLOW_UPS_KEY, ReplyDraft};
