//! Error types for inbox-agent.

use std::path::PathBuf;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the JSON document store.
///
/// The lenient loaders collapse all of these into defaults; the `try_*`
/// loaders surface them so callers can tell "no data" from "bad data".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed document {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Malformed { .. } => "malformed",
            Self::Io { .. } => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Errors raised inside a decision engine.
///
/// These never reach callers directly: the engine boundary converts them
/// into a `{"error": ..., "status": "failed"}` payload.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine {engine} failed: {reason}")]
    Failed { engine: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine output could not be parsed into the shape a caller expects.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Engine reported failure: {0}")]
    EngineFailed(String),

    #[error("Unexpected shape: {0}")]
    Shape(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
