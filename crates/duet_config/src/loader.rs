//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::DuetConfig;
use std::path::Path;

/// Name of the configuration file in a project root.
pub const CONFIG_FILE: &str = "duet.toml";

/// Loads and validates `<project_dir>/duet.toml`.
pub fn load_config(project_dir: &Path) -> Result<DuetConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but a project without `duet.toml` gets the defaults.
pub fn load_config_or_default(project_dir: &Path) -> Result<DuetConfig, ConfigError> {
    match load_config(project_dir) {
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(DuetConfig::default())
        }
        other => other,
    }
}

/// Parses and validates a `duet.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<DuetConfig, ConfigError> {
    let config: DuetConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &DuetConfig) -> Result<(), ConfigError> {
    if config.cache.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "cache.dir must not be empty".to_string(),
        ));
    }
    if config.maker.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "maker.output_dir must not be empty".to_string(),
        ));
    }
    if config.checker.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "checker.timeout_ms must be positive".to_string(),
        ));
    }
    Ok(())
}
