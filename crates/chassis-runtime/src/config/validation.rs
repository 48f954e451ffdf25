//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::AppConfig;

/// Validates the merged configuration before any plugin is resolved.
pub fn validate_config(config: &AppConfig) -> ConfigResult<()> {
    validate_cwd(config)?;
    validate_plugin_refs(config)?;
    Ok(())
}

/// The working directory invariant: absolute and existing.
fn validate_cwd(config: &AppConfig) -> ConfigResult<()> {
    if !config.cwd.is_absolute() {
        return Err(ConfigError::validation(format!(
            "working directory must be absolute: {}",
            config.cwd.display()
        )));
    }
    if !config.cwd.is_dir() {
        return Err(ConfigError::validation(format!(
            "working directory does not exist: {}",
            config.cwd.display()
        )));
    }
    Ok(())
}

/// Every plugin reference needs a non-empty identifier.
fn validate_plugin_refs(config: &AppConfig) -> ConfigResult<()> {
    if config.cache.plugin.plugin_id.trim().is_empty() {
        return Err(ConfigError::missing_field("cache.plugin.plugin_id"));
    }
    for (index, reference) in config.logging.plugins.iter().enumerate() {
        if reference.plugin_id.trim().is_empty() {
            return Err(ConfigError::missing_field(format!(
                "logging.plugins[{index}].plugin_id"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::super::schema::PluginRef;
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            cwd: std::env::current_dir().unwrap(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_relative_cwd_rejected() {
        let mut config = valid_config();
        config.cwd = PathBuf::from("relative/dir");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_missing_cwd_rejected() {
        let mut config = valid_config();
        config.cwd = PathBuf::from("/definitely/not/here");
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_plugin_id_rejected() {
        let mut config = valid_config();
        config.logging.plugins.push(PluginRef::new("  "));
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field } if field.contains("plugins[1]")));
    }
}
