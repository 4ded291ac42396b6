//! Configuration file discovery and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::{BuildConfig, KNOWN_TOOLCHAINS};

/// File picked up from the build directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "soj.toml";

/// Loads the build configuration.
///
/// An explicit path must exist. Without one, `<dir>/soj.toml` is used if
/// present, otherwise the defaults apply.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<BuildConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                log::debug!("no {CONFIG_FILE_NAME} in {}, using defaults", dir.display());
                return Ok(BuildConfig::default());
            }
            candidate
        }
    };

    log::debug!("loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<BuildConfig, ConfigError> {
    let config: BuildConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &BuildConfig) -> Result<(), ConfigError> {
    for (name, settings) in &config.toolchains {
        if !KNOWN_TOOLCHAINS.contains(&name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown toolchain '{name}' (expected one of: {})",
                KNOWN_TOOLCHAINS.join(", ")
            )));
        }
        if settings.command.as_deref() == Some("") {
            return Err(ConfigError::ValidationError(format!(
                "toolchains.{name}.command must not be empty"
            )));
        }
    }
    Ok(())
}
