//! Best-effort overlay loading: built-in defaults first, `quill.json` on top.
//!
//! Loading never fails. A missing, unreadable, or malformed overlay file is
//! the same as an empty one, and each recognized key is applied on its own,
//! so one invalid value cannot discard the rest.

use crate::level::LevelSpec;
use crate::schema::{LogConfig, Mode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overlay file name.
const CONFIG_FILE_NAME: &str = "quill.json";

/// Resolve the well-known overlay file path.
/// Priority: `QUILL_CONFIG` env > `quill.json` beside the executable > `~/.quill/quill.json`
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("QUILL_CONFIG") {
        return PathBuf::from(path);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(CONFIG_FILE_NAME);
        }
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".quill").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load the resolved configuration from the well-known location.
pub fn load() -> LogConfig {
    load_from(&config_file_path())
}

/// Load the resolved configuration with overrides taken from `path`.
pub fn load_from(path: &Path) -> LogConfig {
    let mut config = LogConfig::default();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            debug!(path = %path.display(), "no config overlay; using defaults");
            return config;
        }
    };

    let overrides: Value = match serde_json::from_str(&raw) {
        Ok(overrides) => overrides,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config overlay is not valid JSON; using defaults");
            return config;
        }
    };

    apply_overrides(&mut config, &overrides);
    debug!(path = %path.display(), "applied config overlay");
    config
}

/// Apply the recognized keys of a parsed overlay document, independently.
fn apply_overrides(config: &mut LogConfig, overrides: &Value) {
    if let Some(path) = overrides.get("PATH").and_then(Value::as_str) {
        config.path = PathBuf::from(path);
    }

    if let Some(level) = overrides.get("LEVEL") {
        let resolved = serde_json::from_value::<LevelSpec>(level.clone())
            .ok()
            .and_then(|spec| spec.resolve().ok());
        match resolved {
            Some(level) => config.level = level,
            None => warn!(value = %level, "ignoring invalid LEVEL override"),
        }
    }

    if let Some(mode) = overrides.get("MODE").and_then(Value::as_str) {
        match mode.parse::<Mode>() {
            Ok(mode) => config.mode = mode,
            Err(err) => warn!(error = %err, "ignoring invalid MODE override"),
        }
    }

    if let Some(format) = overrides.get("FORMAT").and_then(Value::as_str) {
        config.format = format.to_string();
    }
}
