//! Configuration loader using figment.
//!
//! Builds the final [`AppConfig`] from layered sources, lowest to highest
//! precedence:
//!
//! 1. Built-in defaults
//! 2. A configuration file, discovered in a directory or named directly
//! 3. Environment variables (`CHASSIS_*`, `__` as nesting separator)
//! 4. Caller overrides
//!
//! Figment merges nested mappings key by key, so a partial override of a
//! plugin settings section never erases the keys it does not mention.
//!
//! # Path handling
//!
//! - `None`: the working directory is the process current directory; no file
//!   is read.
//! - A directory: `settings.{yaml,yml,toml,json}` is searched at the
//!   directory root in that priority order; a miss is not an error. The
//!   working directory is the given directory.
//! - A file: loaded directly; an absent file is an error. The working
//!   directory is the file's parent.
//! - A nonexistent path: an error; `FileNotFound` when the path carries a
//!   supported config extension, `InvalidPath` otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use chassis_runtime::config::load_config;
//!
//! let config = load_config(Some(Path::new("./project")), serde_json::json!({
//!     "cache": { "skip_cache": true },
//! }))?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde_json::Value;
use tracing::{debug, info};

use super::error::{ConfigError, ConfigResult};
use super::schema::AppConfig;
use super::validation::validate_config;

/// Name stem of discoverable configuration files.
pub const CONFIG_STEM: &str = "settings";

/// Supported configuration file extensions, in discovery priority order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["yaml", "yml", "toml", "json"];

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "CHASSIS_";

/// Loads the configuration from layered sources.
///
/// `overrides` is a nested mapping in the shape of the configuration schema
/// (pass `Value::Null` for none); it always wins over file and environment
/// values. The resolved working directory is injected as the strongest layer,
/// then the merged result is extracted and validated.
pub fn load_config(path: Option<&Path>, overrides: Value) -> ConfigResult<AppConfig> {
    let (cwd, file) = resolve_sources(path)?;

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(file) = &file {
        info!(path = %file.display(), "Loading configuration file");
        figment = merge_config_file(figment, file)?;
    } else {
        debug!("No configuration file, using defaults");
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    // Overrides and the resolved cwd live in the global profile: they must
    // win over every lower layer, whichever profile it landed in.
    if !overrides.is_null() {
        figment = figment.merge(Serialized::globals(overrides));
    }

    figment = figment.merge(Serialized::global("cwd", &cwd));

    let config: AppConfig = figment.extract().map_err(map_figment_error)?;
    validate_config(&config)?;

    debug!(
        cwd = %config.cwd.display(),
        log_plugins = config.logging.plugins.len(),
        "Configuration loaded successfully"
    );
    Ok(config)
}

/// Resolves the working directory and the file source (if any) for `path`.
fn resolve_sources(path: Option<&Path>) -> ConfigResult<(PathBuf, Option<PathBuf>)> {
    let Some(path) = path else {
        return Ok((std::env::current_dir()?, None));
    };

    if path.is_dir() {
        let dir = path.canonicalize()?;
        let file = search_config_file(&dir);
        Ok((dir, file))
    } else if path.is_file() {
        let file = path.canonicalize()?;
        let cwd = file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
        Ok((cwd, Some(file)))
    } else if has_supported_extension(path) {
        Err(ConfigError::FileNotFound(path.to_path_buf()))
    } else {
        Err(ConfigError::InvalidPath(path.to_path_buf()))
    }
}

/// Searches a directory root for `settings.{ext}` in priority order.
fn search_config_file(dir: &Path) -> Option<PathBuf> {
    for ext in SUPPORTED_EXTENSIONS {
        let candidate = dir.join(format!("{CONFIG_STEM}.{ext}"));
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Discovered configuration file");
            return Some(candidate);
        }
    }
    None
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Merges a single config file into the figment, dispatching on extension.
fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "toml" => Ok(figment.merge(Toml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(ConfigError::Parse(format!(
            "unsupported configuration file format: .{ext}"
        ))),
    }
}

/// Maps figment extraction failures onto the configuration error taxonomy:
/// a missing required field is a validation-class failure, everything else is
/// malformed content.
fn map_figment_error(error: figment::Error) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::MissingField(field) => ConfigError::MissingField {
            field: field.to_string(),
        },
        Kind::Message(message) if message.starts_with("missing field") => {
            ConfigError::MissingField {
                field: message
                    .trim_start_matches("missing field")
                    .trim()
                    .trim_matches('`')
                    .to_string(),
            }
        }
        _ => ConfigError::Parse(error.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================
