//! `quill-config` — configuration resolution for the quill logging facade.
//!
//! Provides:
//! - Built-in defaults with a best-effort JSON overlay (`quill.json`)
//! - The severity vocabulary (`Level`, `LevelSpec`) and mode whitelist (`Mode`)
//! - The process-wide set-once default module name shared by all loggers

pub mod defaults;
pub mod io;
pub mod level;
pub mod schema;

// Re-export most-used types at crate root.
pub use io::{config_file_path, load, load_from};
pub use level::{Level, LevelError, LevelSpec};
pub use schema::{LogConfig, Mode, ModeError};
