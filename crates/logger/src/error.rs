use quill_config::{LevelError, ModeError};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the logging facade.
///
/// Validation variants are raised at construction time, before the sink is
/// opened. `UnknownPlaceholder` and `Emit` are per-call emission failures
/// and never stop the logger from trying again.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("logger name must not be empty")]
    EmptyName,

    #[error("log file path must not be empty")]
    EmptyPath,

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("level must be a string or an integer severity code")]
    LevelType,

    #[error("configs must be a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' has the wrong type")]
    InvalidField(&'static str),

    #[error("configs are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("context field '{0}' must be a string, number, or boolean")]
    InvalidContextValue(String),

    #[error("format template references unknown placeholder '{0}'")]
    UnknownPlaceholder(String),

    #[error("failed to open log file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append log record")]
    Emit(#[source] std::io::Error),
}
