//! Email agent: chat queries and draft generation.

pub mod assistant;

pub use assistant::EmailAgent;
