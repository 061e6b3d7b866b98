//! Persistence layer: whole-document JSON files.

pub mod json;
pub mod traits;

pub use json::JsonStore;
pub use traits::Store;
