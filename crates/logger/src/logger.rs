//! Logger construction, validation, and the emit family.
//!
//! Every construction surface funnels into [`FileLoggerBuilder::build`],
//! which validates name, path, mode, and level before the sink is opened.
//! A failed build therefore leaves nothing on disk.

use crate::error::LogError;
use crate::template::{FormatTemplate, Record};
use chrono::Local;
use quill_config::{Level, LevelSpec, LogConfig, Mode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A record format as accepted at construction: a template string still to
/// be compiled, or an already compiled formatter reused as-is.
#[derive(Debug, Clone)]
pub enum Format {
    Template(String),
    Compiled(FormatTemplate),
}

impl Format {
    fn into_template(self) -> FormatTemplate {
        match self {
            Format::Template(template) => FormatTemplate::compile(&template),
            Format::Compiled(template) => template,
        }
    }
}

impl From<&str> for Format {
    fn from(template: &str) -> Self {
        Format::Template(template.to_string())
    }
}

impl From<String> for Format {
    fn from(template: String) -> Self {
        Format::Template(template)
    }
}

impl From<FormatTemplate> for Format {
    fn from(template: FormatTemplate) -> Self {
        Format::Compiled(template)
    }
}

/// A leveled logger writing formatted records to one append-mode file.
///
/// Records below the instance threshold are dropped before the sink is
/// touched. Interleaved writes through a shared instance serialize on the
/// sink lock.
#[derive(Debug)]
pub struct FileLogger {
    name: String,
    path: PathBuf,
    mode: Mode,
    level: Level,
    template: FormatTemplate,
    context: BTreeMap<String, String>,
    sink: Mutex<File>,
}

/// Staged construction parameters for [`FileLogger`].
#[derive(Debug)]
pub struct FileLoggerBuilder {
    name: String,
    path: PathBuf,
    mode: Option<String>,
    level: Option<LevelSpec>,
    format: Option<Format>,
}

impl FileLoggerBuilder {
    /// Operating mode tag, checked case-insensitively against the whitelist.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Severity threshold, by name or numeric code.
    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Record format: a template string or a precompiled formatter.
    pub fn format(mut self, format: impl Into<Format>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Validate every parameter, then open the sink.
    pub fn build(self, config: &LogConfig) -> Result<FileLogger, LogError> {
        if self.name.is_empty() {
            return Err(LogError::EmptyName);
        }
        if self.path.as_os_str().is_empty() {
            return Err(LogError::EmptyPath);
        }

        let mode = match self.mode {
            Some(mode) => mode.parse::<Mode>()?,
            None => config.mode,
        };
        let level = match self.level {
            Some(spec) => spec.resolve()?,
            None => config.level,
        };
        let template = self
            .format
            .unwrap_or_else(|| Format::Template(config.format.clone()))
            .into_template();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogError::Open {
                path: self.path.clone(),
                source,
            })?;

        // The first logger built in this process claims the shared default
        // module name; everyone after inherits it.
        let module_name = config.init_module_name(&self.name).to_string();
        let mut context = BTreeMap::new();
        context.insert("module_name".to_string(), module_name);

        debug!(name = %self.name, path = %self.path.display(), level = %level, "registered file logger");

        Ok(FileLogger {
            name: self.name,
            path: self.path,
            mode,
            level,
            template,
            context,
            sink: Mutex::new(file),
        })
    }
}

impl FileLogger {
    /// Start building a logger named `name` writing to `path`.
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> FileLoggerBuilder {
        FileLoggerBuilder {
            name: name.into(),
            path: path.into(),
            mode: None,
            level: None,
            format: None,
        }
    }

    /// Construct from a JSON mapping.
    ///
    /// `name` and `path` are required; `mode`, `format`, and `level`
    /// default from `config` when absent. Null counts as absent for the
    /// required fields.
    pub fn register(config: &LogConfig, entries: &Value) -> Result<FileLogger, LogError> {
        let map = entries.as_object().ok_or(LogError::NotAnObject)?;

        let mut builder =
            FileLogger::builder(required_str(map, "name")?, required_str(map, "path")?);
        if let Some(mode) = map.get("mode") {
            builder = builder.mode(field_str(mode, "mode")?);
        }
        if let Some(format) = map.get("format") {
            builder = builder.format(field_str(format, "format")?);
        }
        if let Some(level) = map.get("level") {
            let spec: LevelSpec =
                serde_json::from_value(level.clone()).map_err(|_| LogError::LevelType)?;
            builder = builder.level(spec);
        }
        builder.build(config)
    }

    /// Construct from a JSON document; behaves exactly like [`FileLogger::register`].
    pub fn register_json(config: &LogConfig, json: &str) -> Result<FileLogger, LogError> {
        let entries: Value = serde_json::from_str(json)?;
        FileLogger::register(config, &entries)
    }

    /// Emit one record at `level`.
    ///
    /// Records below the instance threshold are dropped. A sink failure is
    /// returned, never printed, and does not impair later emissions.
    #[track_caller]
    pub fn log(&self, message: &str, level: Level) -> Result<(), LogError> {
        self.emit(message, level, Location::caller())
    }

    #[track_caller]
    pub fn debug(&self, message: &str) -> Result<(), LogError> {
        self.emit(message, Level::Debug, Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: &str) -> Result<(), LogError> {
        self.emit(message, Level::Info, Location::caller())
    }

    #[track_caller]
    pub fn warning(&self, message: &str) -> Result<(), LogError> {
        self.emit(message, Level::Warning, Location::caller())
    }

    #[track_caller]
    pub fn error(&self, message: &str) -> Result<(), LogError> {
        self.emit(message, Level::Error, Location::caller())
    }

    #[track_caller]
    pub fn critical(&self, message: &str) -> Result<(), LogError> {
        self.emit(message, Level::Critical, Location::caller())
    }

    /// Emit an error record carrying the full cause chain of `cause`.
    #[track_caller]
    pub fn error_with(
        &self,
        message: &str,
        cause: &dyn std::error::Error,
    ) -> Result<(), LogError> {
        let mut full = format!("{message}: {cause}");
        let mut source = cause.source();
        while let Some(err) = source {
            full.push_str(": ");
            full.push_str(&err.to_string());
            source = err.source();
        }
        self.emit(&full, Level::Error, Location::caller())
    }

    fn emit(
        &self,
        message: &str,
        level: Level,
        location: &'static Location<'static>,
    ) -> Result<(), LogError> {
        if level < self.level {
            return Ok(());
        }

        let record = Record {
            timestamp: Local::now(),
            level,
            message,
            logger: &self.name,
            location,
        };
        let line = self.template.render(&record, &self.context)?;

        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            // A poisoned lock still holds a usable append handle.
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(sink, "{line}").map_err(LogError::Emit)
    }

    /// Replace the context fields bound into every record.
    ///
    /// Requires a JSON object; scalar values are bound as strings. On any
    /// error the existing context stays as it was.
    pub fn set_format_extra(&mut self, extra: &Value) -> Result<(), LogError> {
        let map = extra.as_object().ok_or(LogError::NotAnObject)?;

        let mut context = BTreeMap::new();
        for (key, value) in map {
            let bound = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(LogError::InvalidContextValue(key.clone())),
            };
            context.insert(key.clone(), bound);
        }
        self.context = context;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The context fields currently bound into every record.
    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }
}

fn required_str<'a>(
    map: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, LogError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(LogError::MissingField(key)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(LogError::InvalidField(key)),
    }
}

fn field_str<'a>(value: &'a Value, key: &'static str) -> Result<&'a str, LogError> {
    value.as_str().ok_or(LogError::InvalidField(key))
}
