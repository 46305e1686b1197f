//! Resolved configuration: the mode whitelist and the `LogConfig` record
//! shared with every logger construction.

use crate::defaults;
use crate::level::Level;
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The two accepted operating modes.
///
/// The mode is validated at construction and carried on the instance as a
/// descriptive tag; it does not change how records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Debug,
    Production,
}

impl Mode {
    /// The whitelist, in canonical form.
    pub const ALL: [Mode; 2] = [Mode::Debug, Mode::Production];

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Debug => "DEBUG",
            Mode::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode string outside the whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mode should be 'DEBUG' or 'PRODUCTION', got '{0}'")]
pub struct ModeError(pub String);

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Mode::Debug),
            "PRODUCTION" => Ok(Mode::Production),
            _ => Err(ModeError(s.to_string())),
        }
    }
}

/// Resolved logging configuration.
///
/// Built once at startup and shared by reference with every logger
/// construction. Immutable apart from the default module name, a set-once
/// slot claimed by the first logger successfully built in the process.
#[derive(Debug)]
pub struct LogConfig {
    /// Fallback log file path.
    pub path: PathBuf,
    /// Fallback severity threshold.
    pub level: Level,
    /// Fallback mode tag.
    pub mode: Mode,
    /// Fallback record template.
    pub format: String,
    module_name: OnceCell<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            path: PathBuf::from(defaults::DEFAULT_PATH),
            level: defaults::DEFAULT_LEVEL,
            mode: defaults::DEFAULT_MODE,
            format: defaults::DEFAULT_FORMAT.to_string(),
            module_name: OnceCell::new(),
        }
    }
}

impl LogConfig {
    /// The default module name, if a logger has claimed it yet.
    pub fn module_name(&self) -> Option<&str> {
        self.module_name.get().map(String::as_str)
    }

    /// Claim the default module name. The first caller wins; later calls
    /// get the already-claimed value back unchanged.
    pub fn init_module_name(&self, name: &str) -> &str {
        self.module_name.get_or_init(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("debug".parse::<Mode>().unwrap(), Mode::Debug);
        assert_eq!("DEBUG".parse::<Mode>().unwrap(), Mode::Debug);
        assert_eq!("Production".parse::<Mode>().unwrap(), Mode::Production);
    }

    #[test]
    fn mode_rejects_values_outside_the_whitelist() {
        let err = "staging".parse::<Mode>().unwrap_err();
        assert_eq!(err, ModeError("staging".to_string()));
    }

    #[test]
    fn module_name_first_writer_wins() {
        let config = LogConfig::default();
        assert_eq!(config.module_name(), None);
        assert_eq!(config.init_module_name("webui"), "webui");
        assert_eq!(config.init_module_name("worker"), "webui");
        assert_eq!(config.module_name(), Some("webui"));
    }

    #[test]
    fn defaults_are_the_builtin_constants() {
        let config = LogConfig::default();
        assert_eq!(config.path, PathBuf::from("/tmp/logs.log"));
        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.mode, Mode::Debug);
    }
}
