//! Inbox processing pipeline.
//!
//! Every message in a processing pass flows through:
//! 1. `EngineHandle::run()` with the categorization prompt
//! 2. `EngineHandle::run()` with the action-extraction prompt
//! 3. `parse`: engine text → typed values, with documented fallbacks
//!
//! Nothing in the pipeline fails: unusable output becomes a default.

pub mod parse;
pub mod processor;
pub mod types;

pub use processor::EmailProcessor;
pub use types::{CategoryDecision, DraftPayload, ProcessSummary};
