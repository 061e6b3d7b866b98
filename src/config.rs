//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Which decision engine backs the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineBackend {
    /// Deterministic keyword decision table.
    Rules,
}

impl std::str::FromStr for EngineBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" | "mock" => Ok(Self::Rules),
            other => Err(ConfigError::InvalidValue {
                key: "INBOX_AGENT_ENGINE".into(),
                message: format!("unknown engine '{other}' (expected 'rules')"),
            }),
        }
    }
}

/// Day offsets used to compute action-item deadlines from a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    pub meeting_days: u32,
    pub review_days: u32,
    pub submit_days: u32,
    pub rsvp_days: u32,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            meeting_days: 3,
            review_days: 5,
            submit_days: 5,
            rsvp_days: 2,
        }
    }
}

impl DeadlinePolicy {
    /// Read overrides from `INBOX_AGENT_DEADLINE_*_DAYS`; unparseable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            meeting_days: env_parse("INBOX_AGENT_DEADLINE_MEETING_DAYS", defaults.meeting_days),
            review_days: env_parse("INBOX_AGENT_DEADLINE_REVIEW_DAYS", defaults.review_days),
            submit_days: env_parse("INBOX_AGENT_DEADLINE_SUBMIT_DAYS", defaults.submit_days),
            rsvp_days: env_parse("INBOX_AGENT_DEADLINE_RSVP_DAYS", defaults.rsvp_days),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the prompt, draft and inbox documents.
    pub data_dir: PathBuf,
    /// Log engine failures.
    pub debug: bool,
    /// Engine backend.
    pub engine: EngineBackend,
    /// Tone used by `reply <id>` when none is given.
    pub default_tone: String,
    /// Deadline offsets for extracted action items.
    pub deadlines: DeadlinePolicy,
    /// Optional directory for a daily-rolling log file.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            debug: true,
            engine: EngineBackend::Rules,
            default_tone: "professional".to_string(),
            deadlines: DeadlinePolicy::default(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Everything has a default; only an unknown engine name is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = std::env::var("INBOX_AGENT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let debug = std::env::var("INBOX_AGENT_DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.debug);

        let engine = match std::env::var("INBOX_AGENT_ENGINE") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.engine,
        };

        let default_tone = std::env::var("INBOX_AGENT_DEFAULT_TONE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_tone);

        let log_dir = std::env::var("INBOX_AGENT_LOG_DIR").ok().map(PathBuf::from);

        Ok(Self {
            data_dir,
            debug,
            engine,
            default_tone,
            deadlines: DeadlinePolicy::from_env(),
            log_dir,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
