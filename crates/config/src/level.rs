//! Severity vocabulary: canonical levels, name/code lookup tables, and the
//! dispatch over accepted level input shapes.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical severities, ordered ascending.
///
/// Numeric codes follow the conventional 10..50 scale, so `Level::Debug`
/// is both `"debug"` and `10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Every level, ascending.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Numeric severity code.
    pub fn code(self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Canonical upper-case name, as written into records.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Look up a level by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Level> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warning" => Some(Level::Warning),
            "error" => Some(Level::Error),
            "critical" => Some(Level::Critical),
            _ => None,
        }
    }

    /// Look up a level by numeric code.
    pub fn from_code(code: i64) -> Option<Level> {
        match code {
            10 => Some(Level::Debug),
            20 => Some(Level::Info),
            30 => Some(Level::Warning),
            40 => Some(Level::Error),
            50 => Some(Level::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s).ok_or_else(|| LevelError::UnknownName(s.to_string()))
    }
}

/// Failure to resolve a level input to a canonical severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("unrecognized level name '{0}'; expected one of info, debug, warning, error, critical")]
    UnknownName(String),

    #[error("unrecognized level code {0}; expected one of 10, 20, 30, 40, 50")]
    UnknownCode(i64),
}

/// A level as supplied by a caller or an overlay file: a name or a numeric
/// code. All resolution goes through [`LevelSpec::resolve`], which fails on
/// anything outside the lookup tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Name(String),
    Code(i64),
}

impl LevelSpec {
    /// Resolve to a canonical level.
    pub fn resolve(&self) -> Result<Level, LevelError> {
        match self {
            LevelSpec::Name(name) => name.parse(),
            LevelSpec::Code(code) => {
                Level::from_code(*code).ok_or(LevelError::UnknownCode(*code))
            }
        }
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        LevelSpec::Name(name)
    }
}

impl From<i64> for LevelSpec {
    fn from(code: i64) -> Self {
        LevelSpec::Code(code)
    }
}

impl From<i32> for LevelSpec {
    fn from(code: i32) -> Self {
        LevelSpec::Code(code.into())
    }
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        LevelSpec::Code(level.code() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_codes_resolve_to_the_same_level() {
        for level in Level::ALL {
            let by_name = LevelSpec::from(level.as_str().to_lowercase()).resolve().unwrap();
            let by_code = LevelSpec::from(level.code() as i64).resolve().unwrap();
            assert_eq!(by_name, level);
            assert_eq!(by_code, level);
        }
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(Level::from_name("WaRnInG"), Some(Level::Warning));
        assert_eq!("CRITICAL".parse::<Level>().unwrap(), Level::Critical);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = LevelSpec::from("verbose").resolve().unwrap_err();
        assert_eq!(err, LevelError::UnknownName("verbose".to_string()));
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = LevelSpec::from(999).resolve().unwrap_err();
        assert_eq!(err, LevelError::UnknownCode(999));
    }

    #[test]
    fn levels_order_ascending() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let name: LevelSpec = serde_json::from_str("\"error\"").unwrap();
        let code: LevelSpec = serde_json::from_str("40").unwrap();
        assert_eq!(name.resolve().unwrap(), Level::Error);
        assert_eq!(code.resolve().unwrap(), Level::Error);
        assert!(serde_json::from_str::<LevelSpec>("true").is_err());
    }
}
