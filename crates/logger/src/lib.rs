//! `quill-logger` — file-backed leveled logging facade.
//!
//! Validates construction parameters against the resolved configuration,
//! compiles record templates with named placeholders, and writes formatted
//! lines to an append-mode file sink. Severity filtering happens before the
//! sink is touched; a record below the instance threshold is dropped, not
//! buffered.

pub mod error;
pub mod logger;
pub mod template;

pub use error::LogError;
pub use logger::{FileLogger, FileLoggerBuilder, Format};
pub use template::{FormatTemplate, Record};

// Re-export the configuration vocabulary so callers need one crate.
pub use quill_config::{Level, LevelError, LevelSpec, LogConfig, Mode, ModeError};
