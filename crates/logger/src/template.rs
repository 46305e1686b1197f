//! Record templates with named `{placeholder}` fields, compiled once per
//! logger and rendered per record.
//!
//! Compilation accepts any identifier; a placeholder that neither the
//! built-ins nor the instance context can supply fails at render time.

use crate::error::LogError;
use chrono::{DateTime, Local};
use quill_config::Level;
use regex::Regex;
use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// One record on its way to the sink.
#[derive(Debug)]
pub struct Record<'a> {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: &'a str,
    pub logger: &'a str,
    pub location: &'static Location<'static>,
}

/// A compiled record template.
///
/// Built-in placeholders: `timestamp` (human-readable local time), `epoch`
/// (Unix seconds), `level`, `message`, `logger`, `file` (call-site file
/// name), `path` (full call-site path), `line`, `module` (call-site file
/// stem), `pid`. Built-ins resolve first; anything else comes from the
/// instance context.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatTemplate {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

impl FormatTemplate {
    /// Compile a template string into its literal and placeholder segments.
    pub fn compile(template: &str) -> FormatTemplate {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(template) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            if whole.start() > last {
                segments.push(Segment::Literal(template[last..whole.start()].to_string()));
            }
            segments.push(Segment::Placeholder(caps[1].to_string()));
            last = whole.end();
        }
        if last < template.len() {
            segments.push(Segment::Literal(template[last..].to_string()));
        }
        FormatTemplate { segments }
    }

    /// Render a record, merging built-ins with the instance context.
    pub fn render(
        &self,
        record: &Record<'_>,
        context: &BTreeMap<String, String>,
    ) -> Result<String, LogError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(&resolve(name, record, context)?),
            }
        }
        Ok(out)
    }
}

fn resolve(
    name: &str,
    record: &Record<'_>,
    context: &BTreeMap<String, String>,
) -> Result<String, LogError> {
    let value = match name {
        "timestamp" => record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        "epoch" => format!("{:.3}", record.timestamp.timestamp_millis() as f64 / 1000.0),
        "level" => record.level.to_string(),
        "message" => record.message.to_string(),
        "logger" => record.logger.to_string(),
        "file" => file_name(record.location.file()).to_string(),
        "path" => record.location.file().to_string(),
        "line" => record.location.line().to_string(),
        "module" => module_stem(record.location.file()).to_string(),
        "pid" => std::process::id().to_string(),
        other => match context.get(other) {
            Some(value) => value.clone(),
            None => return Err(LogError::UnknownPlaceholder(other.to_string())),
        },
    };
    Ok(value)
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn module_stem(path: &str) -> &str {
    let name = file_name(path);
    name.strip_suffix(".rs").unwrap_or(name)
}
