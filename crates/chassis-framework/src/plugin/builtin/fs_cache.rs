//! Built-in content-addressed file cache plugin.
//!
//! One file per logical key, named by the fixed-width hex digest of a 64-bit
//! FNV-1a hash of the key. Values are UTF-8 strings. There is no collision
//! detection: two keys hashing to the same digest alias each other, which is
//! accepted given the digest width against expected key cardinality.

use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use chassis_core::{
    CachePlugin, ConstructionError, PluginError, SettingsError, SettingsMap, resolve_dir,
};

use crate::plugin::contract::Plugin;

/// Registry identifier for the file cache plugin.
pub const FS_CACHE_PLUGIN_ID: &str = "fs-cache";

// =============================================================================
// Settings
// =============================================================================

/// Settings for [`FsCache`].
///
/// ```yaml
/// cache:
///   plugin:
///     plugin_id: fs-cache
///     settings:
///       directory: cache
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FsCacheSettings {
    /// The working directory relative paths resolve against. Injected from
    /// the configuration; a value in the raw settings section is ignored.
    pub cwd: PathBuf,

    /// Directory holding the cache files, resolved against `cwd`.
    pub directory: PathBuf,

    /// Value encoding. Only UTF-8 is supported; anything else fails
    /// validation.
    pub encoding: String,
}

impl Default for FsCacheSettings {
    fn default() -> Self {
        Self {
            cwd: PathBuf::new(),
            directory: PathBuf::from("cache"),
            encoding: "utf-8".to_string(),
        }
    }
}

// =============================================================================
// FsCache
// =============================================================================

/// Built-in file-backed cache.
///
/// Construction creates the resolved cache directory. Every operation maps
/// the logical key through [`FsCache::cache_key`] and touches exactly one
/// file under that directory.
#[derive(Debug)]
pub struct FsCache {
    directory: PathBuf,
}

impl FsCache {
    /// Derives the on-disk name for a logical key: the 16-digit lowercase
    /// hex form of its 64-bit FNV-1a hash.
    ///
    /// Pure and stable across instances and process restarts.
    pub fn cache_key(key: &str) -> String {
        let mut hasher = FnvHasher::default();
        hasher.write(key.as_bytes());
        format!("{:016x}", hasher.finish())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(Self::cache_key(key))
    }

    /// The resolved directory this cache writes into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Plugin for FsCache {
    type Settings = FsCacheSettings;

    fn derive_settings(cwd: &Path, raw: &SettingsMap) -> Result<FsCacheSettings, SettingsError> {
        let mut settings: FsCacheSettings =
            serde_json::from_value(Value::Object(raw.clone()))?;
        if !matches!(
            settings.encoding.to_ascii_lowercase().as_str(),
            "utf-8" | "utf8"
        ) {
            return Err(SettingsError::invalid(format!(
                "unsupported encoding '{}': only UTF-8 is supported",
                settings.encoding
            )));
        }
        settings.directory = resolve_dir(cwd, &settings.directory, "directory")?;
        settings.cwd = cwd.to_path_buf();
        Ok(settings)
    }

    fn construct(settings: FsCacheSettings) -> Result<Self, ConstructionError> {
        fs::create_dir_all(&settings.directory)?;
        Ok(Self {
            directory: settings.directory,
        })
    }
}

impl CachePlugin for FsCache {
    fn get(&self, key: &str) -> Result<Option<String>, PluginError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PluginError> {
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PluginError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), PluginError> {
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, PluginError> {
        Ok(self.entry_path(key).exists())
    }
}

// =============================================================================
// Tests
// =============================================================================
