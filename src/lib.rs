//! Inbox Agent: email triage over a local inbox snapshot.

pub mod agent;
pub mod cli;
pub mod config;
pub mod drafts;
pub mod engine;
pub mod error;
pub mod inbox;
pub mod pipeline;
pub mod prompts;
pub mod store;
