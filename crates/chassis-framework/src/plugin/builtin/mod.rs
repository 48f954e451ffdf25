//! Built-in plugins shipped with chassis.
//!
//! These are enabled by the `builtin` feature flag (on by default) and cover
//! the plugin identifiers an application gets out of the box:
//!
//! | Identifier | Type | Description |
//! |------------|------|-------------|
//! | [`FS_CACHE_PLUGIN_ID`] (`"fs-cache"`) | cache | Content-addressed file cache |
//! | [`FS_LOGGER_PLUGIN_ID`] (`"fs-logger"`) | logging | Rotating structured/plain file logger |
//! | [`CONSOLE_PLUGIN_ID`] (`"console"`) | logging | Console logger |
//!
//! Third-party plugins share the same flat namespace; register them next to
//! these under their own identifiers before resolution.

pub mod console;
pub mod fs_cache;
pub mod fs_logger;

pub use console::{CONSOLE_PLUGIN_ID, ConsoleLogger, ConsoleSettings};
pub use fs_cache::{FS_CACHE_PLUGIN_ID, FsCache, FsCacheSettings};
pub use fs_logger::{FS_LOGGER_PLUGIN_ID, FsLogger, FsLoggerSettings};
