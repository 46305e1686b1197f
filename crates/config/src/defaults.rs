//! Built-in defaults used wherever the overlay file has nothing to say.

use crate::level::Level;
use crate::schema::Mode;

/// Default log file destination.
pub const DEFAULT_PATH: &str = "/tmp/logs.log";

/// Default severity threshold.
pub const DEFAULT_LEVEL: Level = Level::Warning;

/// Default mode tag.
pub const DEFAULT_MODE: Mode = Mode::Debug;

/// Default record template: timestamp, level name, module tag, message.
pub const DEFAULT_FORMAT: &str = "{timestamp} {level} [Module: {module_name}]: {message}";
